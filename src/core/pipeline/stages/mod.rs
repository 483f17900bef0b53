//! Pipeline stage implementations.
//!
//! Contains the five stages of the instruction pipeline:
//! - Fetch: Reads the instruction word at the PC
//! - Decode: Classifies, checks hazards, reads operands, marks destinations
//! - Execute: Performs ALU operations and computes control-flow targets
//! - Memory: Handles load/store and resolves control flow (with flush)
//! - Writeback: Commits register results and halts the run
//!
//! The CPU calls them in reverse order each cycle so no stage observes a
//! value produced by a younger stage in the same cycle.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
