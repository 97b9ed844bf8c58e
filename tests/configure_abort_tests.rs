//! Configuration that cannot produce a logger ends the process
//!
//! Runs in its own test binary so the failed attempt is the first one.

mod common;

use common::{expect_exit, RecordingTerminator};
use klog_compat::prelude::*;
use klog_compat::FATAL_EXIT_CODE;
use std::sync::Arc;

#[test]
fn test_invalid_configuration_exits_255() {
    let terminator = Arc::new(RecordingTerminator::default());
    let sink = CaptureSink::new();

    let code = expect_exit(|| {
        klog_compat::configure_with(
            Config::new().verbosity(9),
            Arc::new(sink.clone()),
            terminator.clone(),
        );
    });

    assert_eq!(code, FATAL_EXIT_CODE);
    assert_eq!(terminator.codes(), vec![255]);
    assert!(sink.is_empty());
    assert!(!klog_compat::is_configured());
}
