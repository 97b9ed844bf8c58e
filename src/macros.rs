//! Macros restoring the variadic shape of the legacy API.
//!
//! Every macro targets the process-wide logger, or a specific logger when
//! the arguments are prefixed with `logger;`.
//!
//! # Examples
//!
//! ```
//! use klog_compat::{infof, infoln, with_fields, CaptureSink, Klogger, ProcessTerminator};
//! use std::sync::Arc;
//!
//! let sink = CaptureSink::new();
//! let logger = Klogger::new(Arc::new(sink.clone()), Arc::new(ProcessTerminator));
//!
//! let port = 8080;
//! infof!(logger; "listening on port {}", port);
//! infoln!(logger; "ready", port);
//! with_fields!(logger; "port", port).infof(format_args!("bound"));
//!
//! // Without a logger prefix the process-wide logger is used
//! infof!("discarded until the process-wide logger is configured");
//!
//! assert_eq!(sink.messages(), vec!["listening on port 8080", "ready 8080\n", "bound"]);
//! ```

/// Log at info severity with `format!` syntax.
#[macro_export]
macro_rules! infof {
    ($logger:expr; $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::infof(format_args!($($arg)+))
    };
}

/// Log at warning severity with `format!` syntax.
#[macro_export]
macro_rules! warningf {
    ($logger:expr; $($arg:tt)+) => {
        $logger.warningf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::warningf(format_args!($($arg)+))
    };
}

/// Log at error severity with `format!` syntax.
#[macro_export]
macro_rules! errorf {
    ($logger:expr; $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::errorf(format_args!($($arg)+))
    };
}

/// Log at error severity, flush, and exit with code 255.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr; $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::fatalf(format_args!($($arg)+))
    };
}

/// Log at error severity, flush, and exit with code 1.
#[macro_export]
macro_rules! exitf {
    ($logger:expr; $($arg:tt)+) => {
        $logger.exitf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::exitf(format_args!($($arg)+))
    };
}

/// Join any `Display` arguments with spaces and log them as one line at info severity.
///
/// # Examples
///
/// ```
/// use klog_compat::infoln;
/// infoln!("request", 42, "done");
/// ```
#[macro_export]
macro_rules! infoln {
    ($logger:expr; $($arg:expr),+ $(,)?) => {
        $logger.infoln(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::infoln(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

/// Join any `Display` arguments with spaces and log them as one line at warning severity.
#[macro_export]
macro_rules! warningln {
    ($logger:expr; $($arg:expr),+ $(,)?) => {
        $logger.warningln(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::warningln(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

/// Join any `Display` arguments with spaces and log them as one line at error severity.
#[macro_export]
macro_rules! errorln {
    ($logger:expr; $($arg:expr),+ $(,)?) => {
        $logger.errorln(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::errorln(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

/// Attach the fields of every struct or string-keyed map argument.
///
/// # Examples
///
/// ```
/// use klog_compat::with;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Request {
///     method: &'static str,
///     status: u16,
/// }
///
/// let req = Request { method: "GET", status: 200 };
/// with!(req).info("served");
/// ```
#[macro_export]
macro_rules! with {
    ($logger:expr; $($arg:expr),+ $(,)?) => {
        $logger.with(&[$(&$arg as &dyn $crate::Loggable),+])
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::with(&[$(&$arg as &dyn $crate::Loggable),+])
    };
}

/// Attach every argument whole under its type name.
#[macro_export]
macro_rules! with_all {
    ($logger:expr; $($arg:expr),+ $(,)?) => {
        $logger.with_all(&[$(&$arg as &dyn $crate::Loggable),+])
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::with_all(&[$(&$arg as &dyn $crate::Loggable),+])
    };
}

/// Attach an alternating key/value list.
#[macro_export]
macro_rules! with_fields {
    ($logger:expr; $($arg:expr),+ $(,)?) => {
        $logger.with_fields(&[$(&$arg as &dyn $crate::Loggable),+])
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::with_fields(&[$(&$arg as &dyn $crate::Loggable),+])
    };
}
