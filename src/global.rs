//! Process-wide logger and the free-function call surface
//!
//! Until [`configure`] runs, every free function targets a logger backed by
//! [`NopSink`](crate::sinks::NopSink), so code that never configures logging
//! (unit tests, early start-up) still runs without crashing. `configure`
//! executes at most once per process; afterwards [`logger`] permanently
//! returns the configured instance.
//!
//! Prefer passing the `&'static Klogger` returned by `configure` to the code
//! that needs it; the free functions are a convenience for legacy call sites.

use crate::core::{
    Config, Klogger, Level, Loggable, ProcessTerminator, Result, Sink, Terminator, Verbose,
    FATAL_EXIT_CODE, TIME_FORMAT, TIME_KEY,
};
use std::fmt::{self, Display};
use std::sync::{Arc, OnceLock};

static DEFAULT: OnceLock<Klogger> = OnceLock::new();
static CONFIGURED: OnceLock<Klogger> = OnceLock::new();

fn default_logger() -> &'static Klogger {
    DEFAULT.get_or_init(Klogger::nop)
}

/// The configured logger, or the no-op default before configuration
pub fn logger() -> &'static Klogger {
    CONFIGURED.get().unwrap_or_else(default_logger)
}

pub fn is_configured() -> bool {
    CONFIGURED.get().is_some()
}

/// Configure the process-wide logger from `config`
///
/// Runs at most once; concurrent and later callers block until the first
/// call finishes and all receive the same instance. An invalid `config`
/// ends the process with exit code 255 since no logger exists to report it.
pub fn configure(config: Config) -> &'static Klogger {
    CONFIGURED.get_or_init(|| {
        let terminator: Arc<dyn Terminator> = Arc::new(ProcessTerminator);
        match Klogger::from_config(&config, Arc::clone(&terminator)) {
            Ok(logger) => announce(logger, &config),
            Err(e) => abort(terminator.as_ref(), e),
        }
    })
}

/// Like [`configure`], with a caller-supplied sink and terminator
pub fn configure_with(
    config: Config,
    sink: Arc<dyn Sink>,
    terminator: Arc<dyn Terminator>,
) -> &'static Klogger {
    CONFIGURED.get_or_init(|| {
        match Klogger::from_parts(&config, sink, Arc::clone(&terminator)) {
            Ok(logger) => announce(logger, &config),
            Err(e) => abort(terminator.as_ref(), e),
        }
    })
}

fn announce(logger: Klogger, config: &Config) -> Klogger {
    logger.infof(format_args!(
        "initialized logger ({}={}, format={:?}, verbosity={})",
        TIME_KEY, TIME_FORMAT, config.format, config.verbosity
    ));
    logger
}

fn abort(terminator: &dyn Terminator, error: crate::core::LoggerError) -> ! {
    eprintln!("[LOGGER ERROR] Invalid logger configuration: {}", error);
    terminator.exit(FATAL_EXIT_CODE)
}

pub fn flush() -> Result<()> {
    logger().flush()
}

pub fn level() -> Level {
    logger().level()
}

#[track_caller]
pub fn set_level(level: Level) -> bool {
    logger().set_level(level)
}

pub fn v(level: Level) -> Verbose<'static> {
    logger().v(level)
}

pub fn with(args: &[&dyn Loggable]) -> Klogger {
    logger().with(args)
}

pub fn with_all(args: &[&dyn Loggable]) -> Klogger {
    logger().with_all(args)
}

pub fn with_fields(key_values: &[&dyn Loggable]) -> Klogger {
    logger().with_fields(key_values)
}

#[track_caller]
pub fn info(message: impl Display) {
    logger().info(message)
}

#[track_caller]
pub fn infoln(args: &[&dyn Display]) {
    logger().infoln(args)
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    logger().infof(args)
}

#[track_caller]
pub fn info_depth(depth: usize, message: impl Display) {
    logger().info_depth(depth, message)
}

#[track_caller]
pub fn warning(message: impl Display) {
    logger().warning(message)
}

#[track_caller]
pub fn warningln(args: &[&dyn Display]) {
    logger().warningln(args)
}

#[track_caller]
pub fn warningf(args: fmt::Arguments<'_>) {
    logger().warningf(args)
}

#[track_caller]
pub fn warning_depth(depth: usize, message: impl Display) {
    logger().warning_depth(depth, message)
}

#[track_caller]
pub fn error(message: impl Display) {
    logger().error(message)
}

#[track_caller]
pub fn errorln(args: &[&dyn Display]) {
    logger().errorln(args)
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    logger().errorf(args)
}

#[track_caller]
pub fn error_depth(depth: usize, message: impl Display) {
    logger().error_depth(depth, message)
}

#[track_caller]
pub fn fatal(message: impl Display) -> ! {
    logger().fatal(message)
}

#[track_caller]
pub fn fatalln(args: &[&dyn Display]) -> ! {
    logger().fatalln(args)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    logger().fatalf(args)
}

#[track_caller]
pub fn fatal_depth(depth: usize, message: impl Display) -> ! {
    logger().fatal_depth(depth, message)
}

#[track_caller]
pub fn exit(message: impl Display) -> ! {
    logger().exit(message)
}

#[track_caller]
pub fn exitln(args: &[&dyn Display]) -> ! {
    logger().exitln(args)
}

#[track_caller]
pub fn exitf(args: fmt::Arguments<'_>) -> ! {
    logger().exitf(args)
}

#[track_caller]
pub fn exit_depth(depth: usize, message: impl Display) -> ! {
    logger().exit_depth(depth, message)
}
