//! Block-organised byte stores.
//!
//! Both stores hold 256 bytes as 64 big-endian packed 32-bit blocks. Byte
//! accessors select a lane within a block; the instruction store also reads
//! 16-bit words that may straddle two blocks.

/// Data store with byte read/write and bulk serialization.
pub mod dcache;

/// Instruction store with 16-bit word reads.
pub mod icache;

pub use dcache::DataCache;
pub use icache::InstructionCache;

use crate::common::{AccessType, SimError};

/// Capacity of each store in bytes.
pub const CACHE_SIZE: usize = 256;

/// Bytes per storage block.
pub const BLOCK_SIZE: usize = 4;

const NUM_BLOCKS: usize = CACHE_SIZE / BLOCK_SIZE;

/// Fixed-capacity byte store organised as 4-byte blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockStore {
    table: [u32; NUM_BLOCKS],
}

impl Default for BlockStore {
    fn default() -> Self {
        Self {
            table: [0; NUM_BLOCKS],
        }
    }
}

impl BlockStore {
    /// Creates a zero-filled store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from an image, committing bytes in address order.
    ///
    /// Bytes beyond the image are zero.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InitializerOverflow`] if `bytes` is longer than
    /// [`CACHE_SIZE`].
    pub fn from_bytes(bytes: &[u8], source_name: &str) -> Result<Self, SimError> {
        if bytes.len() > CACHE_SIZE {
            return Err(SimError::InitializerOverflow {
                source_name: source_name.to_string(),
                capacity: CACHE_SIZE,
            });
        }
        let mut store = Self::new();
        for (idx, chunk) in bytes.chunks(BLOCK_SIZE).enumerate() {
            let mut block = [0u8; BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            store.table[idx] = u32::from_be_bytes(block);
        }
        Ok(store)
    }

    fn check(addr: u16, access: AccessType) -> Result<usize, SimError> {
        let idx = addr as usize;
        if idx < CACHE_SIZE {
            Ok(idx)
        } else {
            Err(SimError::AddressOutOfRange { access, addr })
        }
    }

    /// Returns the block containing `addr`.
    pub fn read_block(&self, addr: u16, access: AccessType) -> Result<u32, SimError> {
        let idx = Self::check(addr, access)?;
        Ok(self.table[idx / BLOCK_SIZE])
    }

    /// Reads one byte.
    pub fn read_u8(&self, addr: u16, access: AccessType) -> Result<u8, SimError> {
        let block = self.read_block(addr, access)?;
        let lane = addr as usize % BLOCK_SIZE;
        Ok(block.to_be_bytes()[lane])
    }

    /// Writes one byte, leaving the rest of its block intact.
    pub fn write_u8(&mut self, addr: u16, val: u8) -> Result<(), SimError> {
        let idx = Self::check(addr, AccessType::Write)?;
        let mut bytes = self.table[idx / BLOCK_SIZE].to_be_bytes();
        bytes[idx % BLOCK_SIZE] = val;
        self.table[idx / BLOCK_SIZE] = u32::from_be_bytes(bytes);
        Ok(())
    }

    /// Returns the full contents in address order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.table.iter().flat_map(|b| b.to_be_bytes()).collect()
    }
}
