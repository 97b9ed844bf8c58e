//! In-memory sink recording every record
//!
//! Derived sinks share the parent's storage, so one handle observes the
//! output of a whole family of loggers.

use crate::core::{AttributeList, Record, Result, Sink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    records: Arc<Mutex<Vec<Record>>>,
    flushes: Arc<AtomicUsize>,
    bound: AttributeList,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded records, each with the bound attributes of the sink that wrote it
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for CaptureSink {
    fn write(&self, record: &Record) -> Result<()> {
        let mut captured = record.clone();
        captured.attributes = self.bound.concat(&record.attributes);
        self.records.lock().push(captured);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn with_attributes(&self, attributes: AttributeList) -> Arc<dyn Sink> {
        Arc::new(CaptureSink {
            records: Arc::clone(&self.records),
            flushes: Arc::clone(&self.flushes),
            bound: self.bound.concat(&attributes),
        })
    }

    fn name(&self) -> &str {
        "capture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_derived_sink_shares_storage() {
        let sink = CaptureSink::new();
        let derived = sink.with_attributes(AttributeList::new().with_attribute("k", 1));

        sink.write(&Record::new(Severity::Info, "parent")).unwrap();
        derived.write(&Record::new(Severity::Info, "child")).unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert!(records[0].attributes.is_empty());
        assert_eq!(records[1].attributes.len(), 1);
    }

    #[test]
    fn test_flush_and_clear() {
        let sink = CaptureSink::new();
        sink.write(&Record::new(Severity::Debug, "x")).unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.flush_count(), 1);
        sink.clear();
        assert!(sink.is_empty());
    }
}
