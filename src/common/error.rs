//! Simulator error definitions.
//!
//! The processor model has no trap or fault mechanism beyond a terminal
//! halt, so every failure here is fatal: it aborts the run and is reported
//! by the caller. The variants cover:
//! 1. **Initializers:** malformed or oversized hexadecimal input.
//! 2. **Bounds:** register or memory accesses outside the fixed machine.
//! 3. **Decode:** opcode values outside the closed instruction set.
//! 4. **Host:** file I/O and configuration parsing.

use std::io;

use thiserror::Error;

use super::data::AccessType;

/// Fatal simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path of the file being accessed.
        path: String,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },

    /// The TOML configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// An initializer token is not a hexadecimal byte.
    #[error("{source_name}: malformed hex token #{index} '{token}'")]
    MalformedToken {
        /// Name of the initializer (file path or label).
        source_name: String,
        /// Zero-based position of the token in the stream.
        index: usize,
        /// The offending token text.
        token: String,
    },

    /// An initializer supplied more bytes than its store can hold.
    #[error("{source_name}: more than {capacity} initializer tokens")]
    InitializerOverflow {
        /// Name of the initializer (file path or label).
        source_name: String,
        /// Capacity of the target store in bytes.
        capacity: usize,
    },

    /// A store was accessed outside its 256-byte range.
    #[error("{access} access out of range at {addr:#06x}")]
    AddressOutOfRange {
        /// The kind of access that failed.
        access: AccessType,
        /// The offending byte address.
        addr: u16,
    },

    /// A register index outside r0-r15 was used.
    #[error("register index {0} out of range")]
    RegisterOutOfRange(usize),

    /// The opcode field holds an unassigned value.
    #[error("IllegalInstruction({inst:#06x}) at pc {pc:#06x}")]
    IllegalInstruction {
        /// Address the instruction was fetched from.
        pc: u16,
        /// The raw instruction word.
        inst: u16,
    },

    /// The configured cycle budget ran out before `HLT` retired.
    #[error("cycle limit of {0} exceeded without halting")]
    CycleLimitExceeded(u64),

    /// A stage was gated on but its input latch was empty.
    #[error("pipeline invariant violated: {0}")]
    PipelineInvariant(&'static str),
}
