//! Sink implementations

pub mod capture;
pub mod json;
pub mod nop;

pub use capture::CaptureSink;
pub use json::{JsonSink, Output};
pub use nop::NopSink;

pub use crate::core::Sink;
