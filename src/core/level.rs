//! Verbosity levels and the runtime-mutable verbosity gate
//!
//! The gate is the only state shared between threads: every `V(n)` query
//! reads it and the runtime level-setter writes it, so it is a single
//! atomic integer rather than a lock.

use super::error::{LoggerError, Result};
use std::sync::atomic::{AtomicI32, Ordering};

/// Legacy verbosity level (`-v=N`)
pub type Level = i32;

/// Lowest accepted verbosity, also the initial value of every gate
pub const MIN_LEVEL: Level = 0;

/// Highest accepted verbosity
pub const MAX_LEVEL: Level = 4;

/// Check that a verbosity lies within `[MIN_LEVEL, MAX_LEVEL]`
pub fn check_range(level: Level) -> Result<()> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(LoggerError::level_out_of_range(level))
    }
}

/// Atomically readable and writable verbosity threshold
///
/// # Example
///
/// ```
/// use klog_compat::VerbosityGate;
///
/// let gate = VerbosityGate::new();
/// assert!(!gate.enabled(1));
///
/// gate.set(2).unwrap();
/// assert!(gate.enabled(1));
/// assert!(!gate.enabled(3));
/// ```
#[derive(Debug)]
pub struct VerbosityGate {
    level: AtomicI32,
}

impl VerbosityGate {
    /// Create a gate at `MIN_LEVEL`
    pub const fn new() -> Self {
        Self {
            level: AtomicI32::new(MIN_LEVEL),
        }
    }

    /// Create a gate at the given level
    pub fn with_level(level: Level) -> Result<Self> {
        check_range(level)?;
        Ok(Self {
            level: AtomicI32::new(level),
        })
    }

    /// Store a new level; out-of-range values leave the gate unchanged
    pub fn set(&self, level: Level) -> Result<()> {
        check_range(level)?;
        self.level.store(level, Ordering::Relaxed);
        Ok(())
    }

    #[inline]
    pub fn get(&self) -> Level {
        self.level.load(Ordering::Relaxed)
    }

    /// Whether calls at `level` pass the gate right now
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.get()
    }
}

impl Default for VerbosityGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_starts_at_min_level() {
        let gate = VerbosityGate::new();
        assert_eq!(gate.get(), MIN_LEVEL);
        assert!(gate.enabled(0));
        assert!(!gate.enabled(1));
    }

    #[test]
    fn test_set_within_range() {
        let gate = VerbosityGate::new();
        for level in MIN_LEVEL..=MAX_LEVEL {
            gate.set(level).unwrap();
            assert_eq!(gate.get(), level);
        }
    }

    #[test]
    fn test_set_out_of_range_keeps_level() {
        let gate = VerbosityGate::with_level(3).unwrap();

        let err = gate.set(5).unwrap_err();
        assert!(matches!(err, LoggerError::LevelOutOfRange { level: 5, .. }));
        assert!(gate.set(-1).is_err());
        assert_eq!(gate.get(), 3);
    }

    #[test]
    fn test_with_level_rejects_invalid() {
        assert!(VerbosityGate::with_level(MAX_LEVEL + 1).is_err());
        assert!(VerbosityGate::with_level(MIN_LEVEL - 1).is_err());
    }

    #[test]
    fn test_enabled_reads_fresh_value() {
        let gate = VerbosityGate::new();
        assert!(!gate.enabled(2));
        gate.set(2).unwrap();
        assert!(gate.enabled(2));
        gate.set(1).unwrap();
        assert!(!gate.enabled(2));
    }
}
