//! Register File.
//!
//! Sixteen byte-wide general-purpose registers, each paired with a pending
//! flag. A pending flag is raised at decode by an instruction that will
//! write the register and dropped at writeback, which is how the pipeline
//! detects read-after-write hazards without a forwarding network.
//!
//! Register r0 is hardwired to zero: writes to it are discarded.

use super::error::SimError;

/// Number of architectural registers.
pub const NUM_REGS: usize = 16;

/// Register file with per-register pending-write flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u8; NUM_REGS],
    pending: [bool; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register zero and nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a register file from initial values.
    ///
    /// The value supplied for r0 is discarded.
    pub fn with_values(values: [u8; NUM_REGS]) -> Self {
        let mut regs = values;
        regs[0] = 0;
        Self {
            regs,
            pending: [false; NUM_REGS],
        }
    }

    fn check(idx: usize) -> Result<(), SimError> {
        if idx < NUM_REGS {
            Ok(())
        } else {
            Err(SimError::RegisterOutOfRange(idx))
        }
    }

    /// Reads the committed value of a register.
    ///
    /// The value may be stale relative to an in-flight producer; callers
    /// consult [`RegisterFile::is_pending`] first.
    pub fn read(&self, idx: usize) -> Result<u8, SimError> {
        Self::check(idx)?;
        Ok(self.regs[idx])
    }

    /// Writes a register. Writes to r0 are silently ignored.
    pub fn write(&mut self, idx: usize, val: u8) -> Result<(), SimError> {
        Self::check(idx)?;
        if idx != 0 {
            self.regs[idx] = val;
        }
        Ok(())
    }

    /// Returns whether an in-flight instruction will write this register.
    pub fn is_pending(&self, idx: usize) -> Result<bool, SimError> {
        Self::check(idx)?;
        Ok(self.pending[idx])
    }

    /// Raises or clears the pending-write flag of a register.
    pub fn set_pending(&mut self, idx: usize, val: bool) -> Result<(), SimError> {
        Self::check(idx)?;
        self.pending[idx] = val;
        Ok(())
    }

    /// Returns a copy of all register values, r0 first.
    pub fn values(&self) -> [u8; NUM_REGS] {
        self.regs
    }

    /// Dumps the register contents to stdout, four per line.
    ///
    /// Registers with a pending write are marked with `*`.
    pub fn dump(&self) {
        for row in (0..NUM_REGS).step_by(4) {
            let line: Vec<String> = (row..row + 4)
                .map(|i| {
                    let mark = if self.pending[i] { '*' } else { ' ' };
                    format!("r{:<2}={:#04x}{}", i, self.regs[i], mark)
                })
                .collect();
            println!("{}", line.join(" "));
        }
    }
}
