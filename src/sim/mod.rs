//! Simulation harness: initializer loading and result output.

/// Hexadecimal initializer parsing and output writers.
pub mod loader;
