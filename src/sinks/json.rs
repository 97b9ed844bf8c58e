//! Production sink writing encoded records to stdout, stderr or files

use crate::core::{AttributeList, LoggerError, OutputFormat, Record, Result, Sink, STDERR, STDOUT};
use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

/// One destination of a [`JsonSink`]
pub enum Output {
    Stdout,
    Stderr,
    File {
        path: String,
        writer: BufWriter<File>,
    },
}

impl Output {
    /// `stdout`, `stderr`, or a file opened in append mode
    pub fn open(path: &str) -> Result<Self> {
        match path {
            STDOUT => Ok(Output::Stdout),
            STDERR => Ok(Output::Stderr),
            path => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| LoggerError::io_operation("opening log output", path, e))?;
                Ok(Output::File {
                    path: path.to_string(),
                    writer: BufWriter::new(file),
                })
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Output::Stdout => STDOUT,
            Output::Stderr => STDERR,
            Output::File { path, .. } => path,
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Output::Stdout => writeln!(io::stdout().lock(), "{}", line),
            Output::Stderr => writeln!(io::stderr().lock(), "{}", line),
            Output::File { writer, .. } => writeln!(writer, "{}", line),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout => io::stdout().flush(),
            Output::Stderr => io::stderr().flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Output").field(&self.name()).finish()
    }
}

/// Encodes each record as one line and writes it to every output
///
/// Derived sinks share the outputs, so lines from a parent and its derived
/// loggers never interleave mid-line.
///
/// # Example
///
/// ```no_run
/// use klog_compat::{JsonSink, OutputFormat};
///
/// let sink = JsonSink::open(&["stdout".to_string(), "/var/log/app.jsonl".to_string()], OutputFormat::Json)
///     .expect("outputs should open");
/// ```
#[derive(Debug, Clone)]
pub struct JsonSink {
    outputs: Arc<Mutex<Vec<Output>>>,
    bound: AttributeList,
    format: OutputFormat,
    use_colors: bool,
}

impl JsonSink {
    /// Open every path with [`Output::open`]
    pub fn open(paths: &[String], format: OutputFormat) -> Result<Self> {
        let outputs = paths
            .iter()
            .map(|path| Output::open(path))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::with_outputs(outputs, format))
    }

    pub fn with_outputs(outputs: Vec<Output>, format: OutputFormat) -> Self {
        Self {
            outputs: Arc::new(Mutex::new(outputs)),
            bound: AttributeList::new(),
            format,
            use_colors: false,
        }
    }

    /// Color the level column of text output
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl Sink for JsonSink {
    fn write(&self, record: &Record) -> Result<()> {
        let line = self.format.encode(record, &self.bound, self.use_colors)?;

        let mut first_error = None;
        for output in self.outputs.lock().iter_mut() {
            if let Err(e) = output.write_line(&line) {
                first_error.get_or_insert_with(|| {
                    LoggerError::io_operation("writing log record", output.name(), e)
                });
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn flush(&self) -> Result<()> {
        for output in self.outputs.lock().iter_mut() {
            output
                .flush()
                .map_err(|e| LoggerError::io_operation("flushing log output", output.name(), e))?;
        }
        Ok(())
    }

    fn with_attributes(&self, attributes: AttributeList) -> Arc<dyn Sink> {
        Arc::new(JsonSink {
            outputs: Arc::clone(&self.outputs),
            bound: self.bound.concat(&attributes),
            format: self.format,
            use_colors: self.use_colors,
        })
    }

    fn name(&self) -> &str {
        match self.format {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use serde_json::{json, Value};
    use std::error::Error;
    use std::fs;
    use tempfile::tempdir;

    type TestResult = std::result::Result<(), Box<dyn Error>>;

    #[test]
    fn test_json_sink_writes_lines() -> TestResult {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.jsonl");
        let path = log_path.to_string_lossy().to_string();

        let sink = JsonSink::open(&[path], OutputFormat::Json)?;
        let derived = sink.with_attributes(AttributeList::new().with_attribute("request", "r-1"));

        sink.write(&Record::new(Severity::Info, "plain"))?;
        derived.write(&Record::new(Severity::Warning, "tagged"))?;
        sink.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<Value> = content
            .lines()
            .map(serde_json::from_str)
            .collect::<std::result::Result<_, _>>()?;

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["msg"], "plain");
        assert_eq!(lines[0].get("request"), None);
        assert_eq!(lines[1]["level"], "warn");
        assert_eq!(lines[1]["request"], json!("r-1"));
        assert!(lines[1]["time"].is_string());

        Ok(())
    }

    #[test]
    fn test_text_sink() -> TestResult {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");
        let path = log_path.to_string_lossy().to_string();

        let sink = JsonSink::open(&[path], OutputFormat::Text)?.with_colors(true);
        sink.write(&Record::new(Severity::Error, "boom"))?;
        sink.flush()?;

        let content = fs::read_to_string(&log_path)?;
        assert!(content.contains("error"));
        assert!(content.contains("boom"));
        assert_eq!(sink.name(), "text");

        Ok(())
    }

    #[test]
    fn test_open_failure_names_path() {
        let err = JsonSink::open(
            &["/nonexistent-klog-dir/sub/app.log".to_string()],
            OutputFormat::Json,
        )
        .unwrap_err();

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("/nonexistent-klog-dir/sub/app.log"));
    }

    #[test]
    fn test_standard_streams() {
        assert!(matches!(Output::open("stdout"), Ok(Output::Stdout)));
        assert!(matches!(Output::open("stderr"), Ok(Output::Stderr)));
    }
}
