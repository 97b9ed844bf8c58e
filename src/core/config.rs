//! Configuration for the process-wide logger
//!
//! Mirrors the two legacy command-line options (`-v` and
//! `-alsologtostderr`) plus the backend's output settings.

use super::error::{LoggerError, Result};
use super::level::{check_range, Level, MIN_LEVEL};
use super::output_format::OutputFormat;
use serde::{Deserialize, Serialize};

pub const STDOUT: &str = "stdout";
pub const STDERR: &str = "stderr";

/// Logger configuration
///
/// # Example
///
/// ```
/// use klog_compat::{Config, OutputFormat};
///
/// let config = Config::new()
///     .verbosity(2)
///     .also_log_to_stderr(false)
///     .format(OutputFormat::Text);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.resolved_outputs(), vec!["stdout".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial verbosity of the gate
    pub verbosity: Level,

    /// Also write every record to stderr
    pub also_log_to_stderr: bool,

    /// Primary outputs: `stdout`, `stderr` or file paths
    pub output_paths: Vec<String>,

    pub format: OutputFormat,
}

impl Config {
    pub fn new() -> Self {
        Self {
            verbosity: MIN_LEVEL,
            also_log_to_stderr: true,
            output_paths: vec![STDOUT.to_string()],
            format: OutputFormat::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, verbosity: Level) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn also_log_to_stderr(mut self, enabled: bool) -> Self {
        self.also_log_to_stderr = enabled;
        self
    }

    /// Replace the primary outputs
    #[must_use = "builder methods return a new value"]
    pub fn output_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_range(self.verbosity)?;
        if self.output_paths.is_empty() {
            return Err(LoggerError::config(
                "output_paths",
                "at least one output is required",
            ));
        }
        if self.output_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(LoggerError::config("output_paths", "empty output path"));
        }
        Ok(())
    }

    /// Primary outputs followed by stderr when echoing is on
    pub fn resolved_outputs(&self) -> Vec<String> {
        let mut outputs = self.output_paths.clone();
        if self.also_log_to_stderr && !outputs.iter().any(|p| p == STDERR) {
            outputs.push(STDERR.to_string());
        }
        outputs
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.verbosity, 0);
        assert!(config.also_log_to_stderr);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.resolved_outputs(), vec!["stdout", "stderr"]);
    }

    #[test]
    fn test_validate_rejects_bad_verbosity() {
        let err = Config::new().verbosity(9).validate().unwrap_err();
        assert!(matches!(err, LoggerError::LevelOutOfRange { level: 9, .. }));
        assert!(Config::new().verbosity(-2).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_outputs() {
        let config = Config::new().output_paths(Vec::<String>::new());
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(Config::new().output_paths([" "]).validate().is_err());
    }

    #[test]
    fn test_stderr_not_duplicated() {
        let config = Config::new().output_paths(["stderr", "/tmp/app.log"]);
        assert_eq!(config.resolved_outputs(), vec!["stderr", "/tmp/app.log"]);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"verbosity": 3}"#).unwrap();
        assert_eq!(config.verbosity, 3);
        assert!(config.also_log_to_stderr);
        assert_eq!(config.output_paths, vec!["stdout"]);

        let config: Config =
            serde_json::from_str(r#"{"also_log_to_stderr": false, "format": "text"}"#).unwrap();
        assert!(!config.also_log_to_stderr);
        assert_eq!(config.format, OutputFormat::Text);
    }
}
