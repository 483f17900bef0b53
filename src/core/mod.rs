//! CPU core implementation.
//!
//! The core is a single-issue, in-order, five-stage pipeline without
//! forwarding. Hazards are resolved by stalling; control flow is resolved in
//! the memory stage by flushing.

/// The pipeline engine: architectural state, latches, and the cycle loop.
pub mod cpu;

/// Pipeline stages, latches, hazard detection, and control state.
pub mod pipeline;

/// Execution units.
pub mod units;

pub use cpu::Cpu;
