//! Sink that discards everything

use crate::core::{AttributeList, Record, Result, Sink};
use std::sync::Arc;

/// Target of the process-wide logger until it is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NopSink;

impl Sink for NopSink {
    fn write(&self, _record: &Record) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn with_attributes(&self, _attributes: AttributeList) -> Arc<dyn Sink> {
        Arc::new(NopSink)
    }

    fn name(&self) -> &str {
        "nop"
    }
}
