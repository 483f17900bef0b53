//! Execution units used by the Execute stage.

/// Byte ALU, address adder, and branch target adder.
pub mod alu;
