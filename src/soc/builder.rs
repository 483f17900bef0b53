//! System Builder.
//!
//! This module defines the `System` structure, the container for the
//! instruction and data stores that the CPU interacts with.

use crate::common::SimError;
use crate::soc::memory::{DataCache, InstructionCache};

/// Memory system seen by the pipeline.
#[derive(Clone, Debug, Default)]
pub struct System {
    /// Instruction store, read by fetch.
    pub icache: InstructionCache,
    /// Data store, accessed by the memory stage.
    pub dcache: DataCache,
}

impl System {
    /// Creates a system from already populated stores.
    pub fn new(icache: InstructionCache, dcache: DataCache) -> Self {
        Self { icache, dcache }
    }

    /// Creates a system from raw initial store images.
    ///
    /// # Arguments
    ///
    /// * `program` - Instruction store bytes, starting at address 0
    /// * `data` - Data store bytes, starting at address 0
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InitializerOverflow`] if either image exceeds
    /// the store capacity.
    pub fn from_images(program: &[u8], data: &[u8]) -> Result<Self, SimError> {
        Ok(Self {
            icache: InstructionCache::from_bytes(program, "instruction store")?,
            dcache: DataCache::from_bytes(data, "data store")?,
        })
    }
}
