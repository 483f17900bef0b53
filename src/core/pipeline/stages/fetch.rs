use tracing::trace;

use crate::common::SimError;
use crate::core::pipeline::latches::{IfId, IfIdEntry};
use crate::core::Cpu;
use crate::isa::opcodes::INST_BYTES;

/// Fetches the instruction at the PC into the IF/ID latch.
///
/// Fetch only proceeds when decode has consumed the previous instruction
/// and no control-flow instruction is holding decode.
pub fn fetch_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    if !cpu.run.fetch {
        return Ok(());
    }
    if cpu.run.decode || cpu.stall.decode {
        return Ok(());
    }

    let pc = cpu.pc;
    let inst = cpu.bus.icache.read_u16(pc)?;
    trace!("IF  pc={:#06x} inst={:#06x}", pc, inst);

    cpu.if_id = IfId {
        entry: Some(IfIdEntry { pc, inst }),
    };
    cpu.pc = pc.wrapping_add(INST_BYTES);
    cpu.run.decode = true;
    Ok(())
}
