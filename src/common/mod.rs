//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the memory access classification, the error type,
//! and the register file that are shared across the stores, the pipeline
//! stages, and the loaders.

/// Memory access type definitions.
pub mod data;

/// Error types for initializer, decode, and bounds failures.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::AccessType;
pub use error::SimError;
pub use reg::RegisterFile;
