//! System-on-Chip components.
//!
//! The memory side of the machine is two flat 256-byte stores: an
//! instruction store read by fetch and a data store read and written by the
//! memory stage. They are populated once from the initializers and are
//! otherwise passive.

/// System container owning both stores.
pub mod builder;

/// Block-organised instruction and data stores.
pub mod memory;

pub use builder::System;
