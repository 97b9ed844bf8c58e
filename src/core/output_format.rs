//! Encoders turning records into output lines
//!
//! - Json: one object per line, the production encoding
//! - Text: tab-separated, human-readable, optionally colored

use super::attributes::AttributeList;
use super::error::Result;
use super::record::Record;
use super::timestamp::{format_time, TIME_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const LEVEL_KEY: &str = "level";
pub const CALLER_KEY: &str = "caller";
pub const MESSAGE_KEY: &str = "msg";

/// Keys owned by the encoder; attributes using them get [`RESERVED_PREFIX`] prepended
pub const RESERVED_KEYS: [&str; 4] = [LEVEL_KEY, TIME_KEY, CALLER_KEY, MESSAGE_KEY];
pub const RESERVED_PREFIX: &str = "_";

/// Output format for records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `{"level":"info","time":"2025-01-08T10:30:45.123Z","caller":"src/main.rs:10","msg":"hello","A":10}`
    #[default]
    Json,

    /// Example: `2025-01-08T10:30:45.123Z	info	src/main.rs:10	hello	A=10`
    Text,
}

impl OutputFormat {
    /// Encode a record followed by the attributes bound to the emitting sink
    pub fn encode(&self, record: &Record, bound: &AttributeList, use_colors: bool) -> Result<String> {
        match self {
            OutputFormat::Json => Self::encode_json(record, bound),
            OutputFormat::Text => Ok(Self::encode_text(record, bound, use_colors)),
        }
    }

    fn encode_json(record: &Record, bound: &AttributeList) -> Result<String> {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            LEVEL_KEY.to_string(),
            Value::String(record.severity.to_str().to_string()),
        );
        json_obj.insert(
            TIME_KEY.to_string(),
            Value::String(format_time(&record.timestamp)),
        );
        if let Some(caller) = record.caller() {
            json_obj.insert(CALLER_KEY.to_string(), Value::String(caller));
        }
        json_obj.insert(
            MESSAGE_KEY.to_string(),
            Value::String(record.message.clone()),
        );

        for attr in bound.iter().chain(record.attributes.iter()) {
            json_obj.insert(Self::attribute_key(&attr.key), attr.value.clone());
        }

        Ok(serde_json::to_string(&Value::Object(json_obj))?)
    }

    /// Attribute key as written, never one of [`RESERVED_KEYS`]
    fn attribute_key(key: &str) -> String {
        let mut key = key.to_string();
        while RESERVED_KEYS.contains(&key.as_str()) {
            key.insert_str(0, RESERVED_PREFIX);
        }
        key
    }

    fn encode_text(record: &Record, bound: &AttributeList, use_colors: bool) -> String {
        let level = Self::level_label(record, use_colors);
        let mut parts = vec![format_time(&record.timestamp), level];

        if let Some(caller) = record.caller() {
            parts.push(caller);
        }
        parts.push(Self::sanitize_message(&record.message));

        let fields = bound.concat(&record.attributes);
        if !fields.is_empty() {
            parts.push(fields.format_fields());
        }

        parts.join("\t")
    }

    #[cfg(feature = "console")]
    fn level_label(record: &Record, use_colors: bool) -> String {
        use colored::Colorize;
        if use_colors {
            record
                .severity
                .to_str()
                .color(record.severity.color_code())
                .to_string()
        } else {
            record.severity.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_label(record: &Record, _use_colors: bool) -> String {
        record.severity.to_str().to_string()
    }

    /// Keep one record per line in text output
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}
