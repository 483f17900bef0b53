use tracing::{debug, trace};

use crate::common::SimError;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExecOp, IdEx, IdExEntry};
use crate::core::pipeline::signals::AluOp;
use crate::core::Cpu;
use crate::isa::{decode, Instruction};

/// Control-hazard stall cycles charged for every jump or branch.
pub const CONTROL_STALL_CYCLES: u64 = 2;

/// Decodes the instruction in the IF/ID latch into the ID/EX latch.
///
/// On a read-after-write hazard the instruction stays in IF/ID, execute is
/// not enabled, and one data stall is recorded; decode retries next cycle.
/// Jumps and branches freeze decode (and with it fetch) until the memory
/// stage resolves them.
///
/// # Errors
///
/// Returns [`SimError::IllegalInstruction`] for an unassigned opcode.
pub fn decode_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    if !cpu.run.decode || cpu.stall.decode {
        return Ok(());
    }
    if cpu.run.execute || cpu.stall.execute {
        return Ok(());
    }

    let entry = cpu
        .if_id
        .entry
        .ok_or(SimError::PipelineInvariant("decode enabled with empty IF/ID"))?;
    let inst = decode(entry.pc, entry.inst)?;

    if let Some(reg) = hazards::pending_source(&cpu.regs, &inst)? {
        cpu.stats.stalls_data += 1;
        debug!("ID  pc={:#06x} {} stalled on r{}", entry.pc, inst, reg);
        return Ok(());
    }

    trace!("ID  pc={:#06x} {}", entry.pc, inst);

    let regs = &cpu.regs;
    let op = match inst {
        Instruction::Hlt => {
            cpu.run.fetch = false;
            ExecOp::Halt
        }
        Instruction::Jmp { offset } => {
            cpu.stall.decode = true;
            cpu.stats.stalls_control += CONTROL_STALL_CYCLES;
            ExecOp::Jump {
                pc: cpu.pc,
                offset,
            }
        }
        Instruction::Beqz { rs, offset } => {
            let test = regs.read(rs as usize)?;
            cpu.stall.decode = true;
            cpu.stats.stalls_control += CONTROL_STALL_CYCLES;
            ExecOp::Branch {
                pc: cpu.pc,
                offset,
                test,
            }
        }
        Instruction::Store { src, base, offset } => ExecOp::Store {
            value: regs.read(src as usize)?,
            base: regs.read(base as usize)?,
            offset,
        },
        Instruction::Load { rd, base, offset } => ExecOp::Load {
            rd,
            base: regs.read(base as usize)?,
            offset,
        },
        Instruction::Alu { op, rd, rs1, rs2 } => ExecOp::Alu {
            op,
            rd,
            a: regs.read(rs1 as usize)?,
            b: regs.read(rs2 as usize)?,
        },
        Instruction::Inc { rd } => ExecOp::Alu {
            op: AluOp::Inc,
            rd,
            a: regs.read(rd as usize)?,
            b: 0,
        },
        Instruction::Not { rd, rs1 } => ExecOp::Alu {
            op: AluOp::Not,
            rd,
            a: regs.read(rs1 as usize)?,
            b: 0,
        },
    };

    if let Some(rd) = inst.dest() {
        cpu.regs.set_pending(rd, true)?;
    }

    cpu.id_ex = IdEx {
        entry: Some(IdExEntry {
            pc: entry.pc,
            inst,
            op,
        }),
    };
    cpu.run.decode = false;
    cpu.run.execute = true;
    Ok(())
}
