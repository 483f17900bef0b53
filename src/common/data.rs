//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout
//! the simulator. The stores tag their bounds failures with it so a fatal
//! report says which stage walked off the end of memory.

use std::fmt;

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches from the instruction
/// store and data reads/writes against the data store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Two consecutive bytes are read from the instruction store.
    Fetch,

    /// Data read access.
    ///
    /// Used by `LOAD` in the memory stage.
    Read,

    /// Data write access.
    ///
    /// Used by `STORE` in the memory stage.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessType::Fetch => "fetch",
            AccessType::Read => "read",
            AccessType::Write => "write",
        };
        f.write_str(name)
    }
}
