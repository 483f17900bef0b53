//! Instruction Set Architecture definitions.
//!
//! The machine executes a fixed 16-bit encoding. The top four bits select
//! the opcode; the remaining twelve hold register fields, a 4-bit load/store
//! displacement, or an 8-bit control-flow offset depending on the opcode.

/// Decoded instruction forms, encoding, and disassembly.
pub mod instruction;

/// Opcode values and field layout constants.
pub mod opcodes;

pub use instruction::{decode, InstClass, Instruction};
