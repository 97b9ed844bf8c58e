//! Process termination used by `Fatal` and `Exit`

/// Exit code requested by the `fatal*` family
pub const FATAL_EXIT_CODE: i32 = 255;

/// Exit code requested by the `exit*` family
pub const EXIT_CODE: i32 = 1;

pub trait Terminator: Send + Sync {
    fn exit(&self, code: i32) -> !;
}

/// Ends the process with `std::process::exit`
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTerminator;

impl Terminator for ProcessTerminator {
    fn exit(&self, code: i32) -> ! {
        std::process::exit(code)
    }
}
