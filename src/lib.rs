//! # klog_compat
//!
//! A compatibility facade that lets code written against the klog leveled
//! logging API run on a structured JSON logging backend.
//!
//! ## Features
//!
//! - **Legacy surface**: `info`/`warning`/`error` with `ln`, `f` and `depth`
//!   variants, `fatal` (exit 255) and `exit` (exit 1)
//! - **Verbosity gate**: `v(n).info(..)` writes at debug severity when `n`
//!   is at or below the current level, adjustable at runtime
//! - **Safe default**: a no-op logger serves every call until [`configure`]
//!   installs the real one, exactly once
//! - **Structured fields**: [`with`] flattens structs and maps, [`with_all`]
//!   tags whole values by type name, [`with_fields`] takes raw key/value pairs
//!
//! ```
//! use klog_compat::{with_fields, Config};
//!
//! let logger = klog_compat::configure(Config::new().verbosity(1).also_log_to_stderr(false));
//! logger.info("service started");
//! logger.v(1).info("cache warmed");
//! with_fields!(logger; "port", 8080).info("listening");
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Attribute, AttributeList, Config, Described, Fields, Klogger, Level, Loggable,
        LoggerError, OutputFormat, ProcessTerminator, Record, Result, Severity, Sink,
        Terminator, Verbose, VerbosityGate, MAX_LEVEL, MIN_LEVEL,
    };
    pub use crate::sinks::{CaptureSink, JsonSink, NopSink};
}

pub use crate::core::{
    Attribute, AttributeList, Config, Described, Fields, Klogger, Level, Loggable, LoggerError,
    OutputFormat, ProcessTerminator, Record, Result, Severity, Sink, Terminator, Verbose,
    VerbosityGate, EXIT_CODE, FATAL_EXIT_CODE, MAX_LEVEL, MIN_LEVEL, TIME_FORMAT, TIME_KEY,
};
pub use global::{
    configure, configure_with, error, error_depth, errorf, errorln, exit, exit_depth, exitf,
    exitln, fatal, fatal_depth, fatalf, fatalln, flush, info, info_depth, infof, infoln,
    is_configured, level, logger, set_level, v, warning, warning_depth, warningf, warningln,
    with, with_all, with_fields,
};
pub use sinks::{CaptureSink, JsonSink, NopSink, Output};
