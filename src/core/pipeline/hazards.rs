//! Data Hazard Detection.
//!
//! There is no forwarding network: read-after-write hazards are resolved
//! purely by holding the consumer in decode. A hazard exists whenever any
//! register the instruction reads has its pending-write flag raised, i.e. an
//! older instruction that writes it has not yet reached writeback.

use crate::common::{RegisterFile, SimError};
use crate::isa::Instruction;

/// Returns the first source register of `inst` with a pending write.
///
/// # Arguments
///
/// * `regs` - The register file holding the pending flags
/// * `inst` - The instruction sitting in decode
///
/// # Returns
///
/// `Some(reg)` if the instruction must stall, `None` if all its operands
/// are committed.
pub fn pending_source(regs: &RegisterFile, inst: &Instruction) -> Result<Option<usize>, SimError> {
    for reg in inst.sources() {
        if regs.is_pending(reg)? {
            return Ok(Some(reg));
        }
    }
    Ok(None)
}
