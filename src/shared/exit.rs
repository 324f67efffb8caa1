//! Process exit codes. Stable contract for scripts wrapping the binary.

use crate::domain::DomainError;
use std::process::{ExitCode, Termination};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunExit {
    /// Report written. Per-record failures do not change this.
    Success = 0,
    /// Wrong argument count or unparseable arguments.
    Usage = 1,
    /// Input or output path escapes the sandbox base directory.
    PathRejected = 2,
    /// I/O, timeout, or internal failure.
    Failure = 3,
}

impl RunExit {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<&DomainError> for RunExit {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Usage(_) => Self::Usage,
            DomainError::PathSecurity(_) => Self::PathRejected,
            _ => Self::Failure,
        }
    }
}

impl Termination for RunExit {
    fn report(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}
