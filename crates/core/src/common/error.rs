//! Error types for assembly and program loading.
//!
//! Assembly errors are non-fatal and accumulate per source line; loading a
//! program fails as a whole when any line failed to assemble.

use std::fmt;

/// A single assembly error, tagged with the source line that produced it.
///
/// Line numbers are 1-based. Line 0 is reserved for file-level problems
/// (an unreadable source file).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsmError {
    /// 1-based source line number (0 for file-level errors).
    pub line: usize,
    /// Human-readable description of the problem.
    pub message: String,
}

impl AsmError {
    /// Creates an error attached to a source line.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "line {}: {}", self.line, self.message)
        }
    }
}

impl std::error::Error for AsmError {}

/// Failure to load a program into the simulator.
///
/// Produced when the source did not assemble cleanly; carries every
/// per-line error the assembler collected.
#[derive(Clone, Debug)]
pub struct LoadError {
    /// The assembler's accumulated errors, in source order.
    pub errors: Vec<AsmError>,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "assembly failed with {} error(s):", self.errors.len())?;
        for err in &self.errors {
            writeln!(f, "  {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}
