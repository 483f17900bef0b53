//! Instruction pipeline implementation.
//!
//! This module contains the five-stage instruction pipeline (fetch, decode,
//! execute, memory, writeback), pipeline latches for inter-stage communication,
//! hazard detection, and the control state that gates each stage.

/// Read-after-write hazard detection via pending-write flags.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// ALU operations, stage-run flags, and stall latches.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;

pub use latches::{ExMem, IdEx, IfId, MemWb};
pub use signals::{StageFlags, StallLatches};
