use tracing::trace;

use crate::common::SimError;
use crate::core::pipeline::latches::{ExMem, ExMemEntry, ExecOp, MemOp};
use crate::core::units::alu::Alu;
use crate::core::Cpu;

/// Executes the instruction in the ID/EX latch.
///
/// Every instruction is counted here exactly once. Jumps and branches
/// compute their target and freeze execute until memory resolves them.
pub fn execute_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    if !cpu.run.execute || cpu.stall.execute {
        return Ok(());
    }

    let id = cpu
        .id_ex
        .entry
        .ok_or(SimError::PipelineInvariant("execute enabled with empty ID/EX"))?;

    cpu.stats.record(id.inst.class());
    cpu.run.execute = false;

    let op = match id.op {
        ExecOp::Alu { op, rd, a, b } => MemOp::Alu {
            rd,
            result: Alu::execute(op, a, b),
        },
        ExecOp::Load { rd, base, offset } => MemOp::Load {
            rd,
            addr: Alu::effective_address(base, offset),
        },
        ExecOp::Store {
            value,
            base,
            offset,
        } => MemOp::Store {
            addr: Alu::effective_address(base, offset),
            value,
        },
        ExecOp::Jump { pc, offset } => {
            cpu.stall.execute = true;
            MemOp::Redirect {
                target: Alu::branch_target(pc, offset),
            }
        }
        ExecOp::Branch { pc, offset, test } => {
            cpu.stall.execute = true;
            let target = if test == 0 {
                Alu::branch_target(pc, offset)
            } else {
                pc
            };
            MemOp::Redirect { target }
        }
        ExecOp::Halt => MemOp::Halt,
    };

    trace!("EX  pc={:#06x} {} -> {:?}", id.pc, id.inst, op);

    cpu.ex_mem = ExMem {
        entry: Some(ExMemEntry {
            pc: id.pc,
            inst: id.inst,
            op,
        }),
    };
    cpu.run.memory = true;
    Ok(())
}
