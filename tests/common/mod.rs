//! Shared helpers for integration tests

#![allow(dead_code)]

use klog_compat::prelude::*;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Panic payload standing in for a process exit
#[derive(Debug)]
pub struct ExitRequested(pub i32);

/// Records requested exit codes and unwinds instead of exiting
#[derive(Default)]
pub struct RecordingTerminator {
    codes: Mutex<Vec<i32>>,
}

impl RecordingTerminator {
    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn exit(&self, code: i32) -> ! {
        self.codes.lock().push(code);
        std::panic::panic_any(ExitRequested(code))
    }
}

pub fn capture_logger() -> (Klogger, CaptureSink, Arc<RecordingTerminator>) {
    let sink = CaptureSink::new();
    let terminator = Arc::new(RecordingTerminator::default());
    let logger = Klogger::new(Arc::new(sink.clone()), terminator.clone());
    (logger, sink, terminator)
}

/// Run `f`, which is expected to request an exit, and return the exit code
pub fn expect_exit<F: FnOnce()>(f: F) -> i32 {
    let payload = catch_unwind(AssertUnwindSafe(f)).expect_err("expected an exit request");
    payload
        .downcast_ref::<ExitRequested>()
        .map(|exit| exit.0)
        .expect("panic payload should be ExitRequested")
}
