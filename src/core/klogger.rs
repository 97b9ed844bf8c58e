//! Leveled logger with the legacy klog call surface

use super::{
    attributes::AttributeList,
    config::Config,
    error::Result,
    fields::Loggable,
    level::{Level, VerbosityGate},
    record::Record,
    severity::Severity,
    sink::Sink,
    terminator::{ProcessTerminator, Terminator, EXIT_CODE, FATAL_EXIT_CODE},
};
use crate::sinks::{JsonSink, NopSink};
use std::fmt::{self, Display};
use std::panic::Location;
use std::sync::Arc;

/// Join `*ln` arguments with single spaces and terminate the line
fn join_line(args: &[&dyn Display]) -> String {
    let mut line = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    line.push('\n');
    line
}

/// Logger handle: a sink, a verbosity gate and a terminator
///
/// Cloning is cheap; clones share all three. Loggers derived with
/// [`with`](Klogger::with), [`with_all`](Klogger::with_all) or
/// [`with_fields`](Klogger::with_fields) get a new sink carrying the extra
/// attributes but keep sharing the parent's gate, so `V(n)` answers the same
/// on both and a runtime `set_level` reaches every derived logger.
///
/// # Example
///
/// ```
/// use klog_compat::{CaptureSink, Klogger, ProcessTerminator};
/// use std::sync::Arc;
///
/// let sink = CaptureSink::new();
/// let logger = Klogger::new(Arc::new(sink.clone()), Arc::new(ProcessTerminator));
///
/// logger.info("started");
/// logger.v(1).info("hidden until verbosity >= 1");
/// logger.set_level(1);
/// logger.v(1).info("now visible");
///
/// assert_eq!(sink.messages(), vec!["started", "now visible"]);
/// ```
#[derive(Clone)]
pub struct Klogger {
    sink: Arc<dyn Sink>,
    gate: Arc<VerbosityGate>,
    terminator: Arc<dyn Terminator>,
}

impl Klogger {
    /// Create a logger with its gate at `MIN_LEVEL`
    #[must_use]
    pub fn new(sink: Arc<dyn Sink>, terminator: Arc<dyn Terminator>) -> Self {
        Self {
            sink,
            gate: Arc::new(VerbosityGate::new()),
            terminator,
        }
    }

    /// The harmless logger used before configuration: discards every record
    #[must_use]
    pub fn nop() -> Self {
        Self::new(Arc::new(NopSink), Arc::new(ProcessTerminator))
    }

    /// Validate `config` and build a logger around an existing sink
    pub fn from_parts(
        config: &Config,
        sink: Arc<dyn Sink>,
        terminator: Arc<dyn Terminator>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sink,
            gate: Arc::new(VerbosityGate::with_level(config.verbosity)?),
            terminator,
        })
    }

    /// Validate `config` and build a logger writing to its outputs
    pub fn from_config(config: &Config, terminator: Arc<dyn Terminator>) -> Result<Self> {
        config.validate()?;
        let sink = JsonSink::open(&config.resolved_outputs(), config.format)?;
        Self::from_parts(config, Arc::new(sink), terminator)
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn gate(&self) -> &VerbosityGate {
        &self.gate
    }

    pub fn level(&self) -> Level {
        self.gate.get()
    }

    /// Change verbosity at runtime
    ///
    /// Out-of-range values are reported on the warning channel and leave
    /// the level unchanged.
    #[track_caller]
    pub fn set_level(&self, level: Level) -> bool {
        match self.gate.set(level) {
            Ok(()) => true,
            Err(e) => {
                self.warningf(format_args!("failed to set verbosity: {}", e));
                false
            }
        }
    }

    /// Gate a debug-tier call on the current verbosity
    #[inline]
    pub fn v(&self, level: Level) -> Verbose<'_> {
        Verbose {
            enabled: self.gate.enabled(level),
            logger: self,
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    #[track_caller]
    fn emit(&self, severity: Severity, depth: usize, message: String) {
        let record = Record::new(severity, message)
            .at(Location::caller())
            .with_depth(depth);

        if let Err(e) = self.sink.write(&record) {
            eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", self.sink.name(), e);
        }
    }

    /// Write at error severity, flush, then hand over to the terminator
    #[track_caller]
    fn emit_and_exit(&self, depth: usize, message: String, code: i32) -> ! {
        self.emit(Severity::Error, depth, message);
        if let Err(e) = self.sink.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush before exit({}): {}",
                code, e
            );
        }
        self.terminator.exit(code)
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.emit(Severity::Info, 0, message.to_string());
    }

    #[track_caller]
    pub fn infoln(&self, args: &[&dyn Display]) {
        self.emit(Severity::Info, 0, join_line(args));
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Info, 0, fmt::format(args));
    }

    #[track_caller]
    pub fn info_depth(&self, depth: usize, message: impl Display) {
        self.emit(Severity::Info, depth, message.to_string());
    }

    #[track_caller]
    pub fn warning(&self, message: impl Display) {
        self.emit(Severity::Warning, 0, message.to_string());
    }

    #[track_caller]
    pub fn warningln(&self, args: &[&dyn Display]) {
        self.emit(Severity::Warning, 0, join_line(args));
    }

    #[track_caller]
    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Warning, 0, fmt::format(args));
    }

    #[track_caller]
    pub fn warning_depth(&self, depth: usize, message: impl Display) {
        self.emit(Severity::Warning, depth, message.to_string());
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.emit(Severity::Error, 0, message.to_string());
    }

    #[track_caller]
    pub fn errorln(&self, args: &[&dyn Display]) {
        self.emit(Severity::Error, 0, join_line(args));
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Error, 0, fmt::format(args));
    }

    #[track_caller]
    pub fn error_depth(&self, depth: usize, message: impl Display) {
        self.emit(Severity::Error, depth, message.to_string());
    }

    #[track_caller]
    pub fn fatal(&self, message: impl Display) -> ! {
        self.emit_and_exit(0, message.to_string(), FATAL_EXIT_CODE)
    }

    #[track_caller]
    pub fn fatalln(&self, args: &[&dyn Display]) -> ! {
        self.emit_and_exit(0, join_line(args), FATAL_EXIT_CODE)
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_and_exit(0, fmt::format(args), FATAL_EXIT_CODE)
    }

    #[track_caller]
    pub fn fatal_depth(&self, depth: usize, message: impl Display) -> ! {
        self.emit_and_exit(depth, message.to_string(), FATAL_EXIT_CODE)
    }

    #[track_caller]
    pub fn exit(&self, message: impl Display) -> ! {
        self.emit_and_exit(0, message.to_string(), EXIT_CODE)
    }

    #[track_caller]
    pub fn exitln(&self, args: &[&dyn Display]) -> ! {
        self.emit_and_exit(0, join_line(args), EXIT_CODE)
    }

    #[track_caller]
    pub fn exitf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_and_exit(0, fmt::format(args), EXIT_CODE)
    }

    #[track_caller]
    pub fn exit_depth(&self, depth: usize, message: impl Display) -> ! {
        self.emit_and_exit(depth, message.to_string(), EXIT_CODE)
    }

    fn derive(&self, sink: Arc<dyn Sink>) -> Klogger {
        Klogger {
            sink,
            gate: Arc::clone(&self.gate),
            terminator: Arc::clone(&self.terminator),
        }
    }

    /// Attach each argument's top-level fields
    ///
    /// Structs contribute one attribute per serialized field and maps one per
    /// string-keyed entry. Any other argument is skipped without error.
    pub fn with(&self, args: &[&dyn Loggable]) -> Klogger {
        let mut attributes = AttributeList::new();
        for arg in args {
            arg.flatten(&mut attributes);
        }
        self.derive(self.sink.with_attributes(attributes))
    }

    /// Attach each argument whole, keyed by its type name
    pub fn with_all(&self, args: &[&dyn Loggable]) -> Klogger {
        let mut attributes = AttributeList::new();
        for arg in args {
            attributes.push(arg.type_name(), arg.to_value());
        }
        self.derive(self.sink.with_attributes(attributes))
    }

    /// Attach an alternating key/value sequence without inspecting shapes
    ///
    /// Odd-length input and non-string keys are reported by the sink.
    pub fn with_fields(&self, key_values: &[&dyn Loggable]) -> Klogger {
        let key_values = key_values.iter().map(|kv| kv.to_value()).collect();
        self.derive(self.sink.with_key_values(key_values))
    }
}

impl Default for Klogger {
    fn default() -> Self {
        Self::nop()
    }
}

impl fmt::Debug for Klogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Klogger")
            .field("sink", &self.sink.name())
            .field("level", &self.gate.get())
            .finish()
    }
}

/// Result of a `V(n)` query, consumed by chaining an `info*` call
///
/// Enabled tokens write at debug severity: legacy verbose info maps to the
/// backend's debug tier while plain `info` stays at info.
#[derive(Clone, Copy)]
#[must_use = "a verbosity token does nothing unless an info call is chained"]
pub struct Verbose<'a> {
    enabled: bool,
    logger: &'a Klogger,
}

impl Verbose<'_> {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[track_caller]
    pub fn info(self, message: impl Display) {
        if self.enabled {
            self.logger.emit(Severity::Debug, 0, message.to_string());
        }
    }

    #[track_caller]
    pub fn infoln(self, args: &[&dyn Display]) {
        if self.enabled {
            self.logger.emit(Severity::Debug, 0, join_line(args));
        }
    }

    #[track_caller]
    pub fn infof(self, args: fmt::Arguments<'_>) {
        if self.enabled {
            self.logger.emit(Severity::Debug, 0, fmt::format(args));
        }
    }
}
