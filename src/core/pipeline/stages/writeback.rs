use tracing::{debug, trace};

use crate::common::SimError;
use crate::core::pipeline::latches::WbOp;
use crate::core::Cpu;

/// Commits the instruction in the MEM/WB latch.
///
/// A register write always clears that register's pending flag, which is
/// what releases any consumer stalled in decode.
pub fn wb_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    if !cpu.run.writeback {
        return Ok(());
    }
    cpu.run.writeback = false;

    let wb = cpu
        .mem_wb
        .entry
        .ok_or(SimError::PipelineInvariant("writeback enabled with empty MEM/WB"))?;

    let (rd, val) = match wb.op {
        WbOp::Halt => {
            debug!("WB  pc={:#06x} HLT retired", wb.pc);
            cpu.halted = true;
            return Ok(());
        }
        WbOp::Store => {
            trace!("WB  pc={:#06x}", wb.pc);
            return Ok(());
        }
        WbOp::Load { rd, data } => (rd as usize, data),
        WbOp::Alu { rd, result } => (rd as usize, result),
    };

    trace!("WB  pc={:#06x} r{} <= {:#04x}", wb.pc, rd, val);
    cpu.regs.write(rd, val)?;
    cpu.regs.set_pending(rd, false)?;
    Ok(())
}
