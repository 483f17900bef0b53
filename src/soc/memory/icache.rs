//! Instruction store.

use super::{BlockStore, BLOCK_SIZE};
use crate::common::{AccessType, SimError};

/// Read-only store holding the program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionCache {
    store: BlockStore,
}

impl InstructionCache {
    /// Creates an instruction store from a program image.
    pub fn from_bytes(bytes: &[u8], source_name: &str) -> Result<Self, SimError> {
        Ok(Self {
            store: BlockStore::from_bytes(bytes, source_name)?,
        })
    }

    /// Reads the big-endian instruction word at `addr`.
    ///
    /// Offsets 0-2 within a block are served from one block; offset 3 takes
    /// its low byte from the first byte of the next block.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] if either byte lies outside
    /// the store.
    pub fn read_u16(&self, addr: u16) -> Result<u16, SimError> {
        let block = self.store.read_block(addr, AccessType::Fetch)?;
        let word = match addr as usize % BLOCK_SIZE {
            0 => block >> 16,
            1 => (block >> 8) & 0xffff,
            2 => block & 0xffff,
            _ => {
                let next_addr = addr.checked_add(1).ok_or(SimError::AddressOutOfRange {
                    access: AccessType::Fetch,
                    addr,
                })?;
                let next = self.store.read_block(next_addr, AccessType::Fetch)?;
                ((block & 0xff) << 8) | (next >> 24)
            }
        };
        Ok(word as u16)
    }
}
