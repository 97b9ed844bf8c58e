//! Sink trait for the structured backend the facade writes to

use super::attributes::AttributeList;
use super::error::Result;
use super::record::Record;
use super::severity::Severity;
use serde_json::{json, Value};
use std::sync::Arc;

pub const IGNORED_KEY: &str = "ignored";
pub const INVALID_KEY: &str = "invalid";

/// Destination for leveled records
///
/// A sink owns encoding, output and flushing. Derived sinks share the
/// parent's outputs and carry extra bound attributes.
pub trait Sink: Send + Sync {
    fn write(&self, record: &Record) -> Result<()>;

    fn flush(&self) -> Result<()>;

    /// A sink sharing this one's outputs with `attributes` bound after its own
    fn with_attributes(&self, attributes: AttributeList) -> Arc<dyn Sink>;

    fn name(&self) -> &str;

    /// Bind an alternating key/value sequence
    ///
    /// A trailing key without a value and pairs whose key is not a string
    /// are dropped. Both are reported through this sink at error severity
    /// and never fail the caller.
    fn with_key_values(&self, key_values: Vec<Value>) -> Arc<dyn Sink> {
        let mut attributes = AttributeList::new();
        let mut invalid = Vec::new();
        let mut iter = key_values.into_iter().enumerate();

        while let Some((position, key)) = iter.next() {
            let Some((_, value)) = iter.next() else {
                report(
                    self,
                    "Ignored key without a value.",
                    AttributeList::new().with_attribute(IGNORED_KEY, key),
                );
                break;
            };

            match key {
                Value::String(key) => attributes.push(key, value),
                key => invalid.push(json!({ "position": position, "key": key, "value": value })),
            }
        }

        if !invalid.is_empty() {
            report(
                self,
                "Ignored key-value pairs with non-string keys.",
                AttributeList::new().with_attribute(INVALID_KEY, Value::Array(invalid)),
            );
        }

        self.with_attributes(attributes)
    }
}

fn report<S: Sink + ?Sized>(sink: &S, message: &str, attributes: AttributeList) {
    let record = Record::new(Severity::Error, message).with_attributes(attributes);
    if let Err(e) = sink.write(&record) {
        eprintln!("[LOGGER ERROR] Sink '{}' failed to report: {}", sink.name(), e);
    }
}
