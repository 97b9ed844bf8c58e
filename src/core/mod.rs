//! Core logger types and traits

pub mod attributes;
pub mod config;
pub mod error;
pub mod fields;
pub mod klogger;
pub mod level;
pub mod output_format;
pub mod record;
pub mod severity;
pub mod sink;
pub mod terminator;
pub mod timestamp;

pub use attributes::{Attribute, AttributeList};
pub use config::{Config, STDERR, STDOUT};
pub use error::{LoggerError, Result};
pub use fields::{short_type_name, Described, Fields, Loggable};
pub use klogger::{Klogger, Verbose};
pub use level::{check_range, Level, VerbosityGate, MAX_LEVEL, MIN_LEVEL};
pub use output_format::OutputFormat;
pub use record::Record;
pub use severity::Severity;
pub use sink::Sink;
pub use terminator::{ProcessTerminator, Terminator, EXIT_CODE, FATAL_EXIT_CODE};
pub use timestamp::{TIME_FORMAT, TIME_KEY};
