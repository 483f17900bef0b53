use tracing::{debug, trace};

use crate::common::SimError;
use crate::core::pipeline::latches::{MemOp, MemWb, MemWbEntry, WbOp};
use crate::core::pipeline::signals::StallLatches;
use crate::core::Cpu;

/// Performs the memory access for the instruction in the EX/MEM latch.
///
/// Control-flow instructions are resolved here: if the target differs from
/// the PC the pipeline is redirected and flushed, otherwise the stall
/// latches are simply released. They never reach writeback.
pub fn mem_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    if !cpu.run.memory {
        return Ok(());
    }
    cpu.run.memory = false;

    let ex = cpu
        .ex_mem
        .entry
        .ok_or(SimError::PipelineInvariant("memory enabled with empty EX/MEM"))?;

    let op = match ex.op {
        MemOp::Halt => WbOp::Halt,
        MemOp::Redirect { target } => {
            if target == cpu.pc {
                debug!("MEM pc={:#06x} {} falls through", ex.pc, ex.inst);
                cpu.run.decode = false;
                cpu.stall = StallLatches::default();
            } else {
                debug!(
                    "MEM pc={:#06x} {} redirects {:#06x} -> {:#06x}",
                    ex.pc, ex.inst, cpu.pc, target
                );
                cpu.pc = target;
                cpu.flush();
            }
            cpu.run.writeback = false;
            return Ok(());
        }
        MemOp::Store { addr, value } => {
            trace!(
                "MEM pc={:#06x} STORE addr={:#04x} data={:#04x}",
                ex.pc,
                addr,
                value
            );
            cpu.bus.dcache.write_u8(addr as u16, value)?;
            WbOp::Store
        }
        MemOp::Load { rd, addr } => {
            let data = cpu.bus.dcache.read_u8(addr as u16)?;
            trace!(
                "MEM pc={:#06x} LOAD addr={:#04x} data={:#04x}",
                ex.pc,
                addr,
                data
            );
            WbOp::Load { rd, data }
        }
        MemOp::Alu { rd, result } => {
            trace!("MEM pc={:#06x}", ex.pc);
            WbOp::Alu { rd, result }
        }
    };

    cpu.mem_wb = MemWb {
        entry: Some(MemWbEntry {
            pc: ex.pc,
            inst: ex.inst,
            op,
        }),
    };
    cpu.run.writeback = true;
    Ok(())
}
