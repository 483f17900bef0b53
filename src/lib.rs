//! Five-Stage Pipeline Simulator Library.
//!
//! This crate implements a cycle-accurate simulator of an in-order, 5-stage
//! pipelined processor executing a fixed 16-bit instruction encoding over a
//! sixteen-register, byte-wide register file and 256-byte instruction and
//! data stores. It is meant for instruction-level performance study: cycle
//! counts, stall breakdown, and instruction-class mix.
//!
//! # Architecture
//!
//! * **Core**: 5-stage in-order pipeline (Fetch, Decode, Execute, Memory, Writeback)
//!   with no forwarding. RAW hazards stall decode on per-register pending flags;
//!   jumps and branches freeze the front end and are resolved in Memory.
//! * **Memory**: flat block-organised instruction and data stores.
//!
//! # Modules
//!
//! * `common`: Shared types, error handling, and the register file.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Initializer loading and output writers.
//! * `soc`: Instruction and data stores.
//! * `stats`: Performance statistics collection.

/// Shared types, error handling, and register definitions.
///
/// Provides the error type used by every fallible operation, the memory
/// access classification, and the register file with pending flags.
pub mod common;

/// Configuration system for run limits and file locations.
///
/// Loads and parses TOML configuration files.
pub mod config;

/// CPU core implementation including pipeline stages and execution units.
///
/// Implements the 5-stage in-order pipeline, its latches, hazard detection,
/// and the flush protocol.
pub mod core;

/// Instruction Set Architecture definitions and decoder.
pub mod isa;

/// Simulation harness: initializer loading and output writers.
pub mod sim;

/// Instruction and data stores.
pub mod soc;

/// Performance statistics collection and reporting.
///
/// Tracks cycle counts, instruction class counts, and stalls by cause.
pub mod stats;
