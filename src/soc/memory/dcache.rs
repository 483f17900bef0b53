//! Data store.

use std::io::{self, Write};

use super::BlockStore;
use crate::common::{AccessType, SimError};

/// Byte-addressable data memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataCache {
    store: BlockStore,
}

impl DataCache {
    /// Creates a data store from an initial image.
    pub fn from_bytes(bytes: &[u8], source_name: &str) -> Result<Self, SimError> {
        Ok(Self {
            store: BlockStore::from_bytes(bytes, source_name)?,
        })
    }

    /// Reads one byte.
    pub fn read_u8(&self, addr: u16) -> Result<u8, SimError> {
        self.store.read_u8(addr, AccessType::Read)
    }

    /// Writes one byte.
    pub fn write_u8(&mut self, addr: u16, val: u8) -> Result<(), SimError> {
        self.store.write_u8(addr, val)
    }

    /// Returns the full contents in address order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.store.to_bytes()
    }

    /// Serializes the contents as one two-digit lowercase hex byte per line.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for byte in self.store.to_bytes() {
            writeln!(out, "{:02x}", byte)?;
        }
        Ok(())
    }
}
