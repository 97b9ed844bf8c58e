//! Log record handed to sinks

use super::attributes::AttributeList;
use super::severity::Severity;
use chrono::{DateTime, Utc};
use std::panic::Location;

#[derive(Debug, Clone)]
pub struct Record {
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
    /// Extra caller frames the emitter asked the sink to skip
    pub depth: usize,
    /// Attributes carried by this record only; sinks put them after their bound ones
    pub attributes: AttributeList,
}

impl Record {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            timestamp: Utc::now(),
            file: None,
            line: None,
            depth: 0,
            attributes: AttributeList::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, location: &'static Location<'static>) -> Self {
        self.file = Some(location.file());
        self.line = Some(location.line());
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeList) -> Self {
        self.attributes = attributes;
        self
    }

    /// `file:line` of the call site, when known
    pub fn caller(&self) -> Option<String> {
        match (self.file, self.line) {
            (Some(file), Some(line)) => Some(format!("{}:{}", file, line)),
            (Some(file), None) => Some(file.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_location() {
        let record = Record::new(Severity::Info, "hello").at(Location::caller());
        let caller = record.caller().unwrap();
        assert!(caller.contains(".rs:"));
        assert_eq!(record.depth, 0);
    }

    #[test]
    fn test_record_without_location() {
        let record = Record::new(Severity::Error, "boom").with_depth(2);
        assert_eq!(record.caller(), None);
        assert_eq!(record.depth, 2);
        assert!(record.attributes.is_empty());
    }
}
