//! Decoded instruction forms.
//!
//! Decoding is a separate, pure step that maps a raw 16-bit word onto one
//! variant per opcode class, each carrying only the fields that class uses.
//! The pipeline's decode stage calls [`decode`] and then works purely on the
//! typed form; it never re-extracts bit fields.

use std::fmt;

use super::opcodes::*;
use crate::common::SimError;
use crate::core::pipeline::signals::AluOp;

/// Instruction class used for the statistics breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstClass {
    /// `ADD`, `SUB`, `MUL`, `INC`.
    Arithmetic,
    /// `AND`, `OR`, `NOT`, `XOR`.
    Logical,
    /// `LOAD`, `STORE`.
    Data,
    /// `JMP`, `BEQZ`.
    Control,
    /// `HLT`.
    Halt,
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Two-operand register form: `rd = rs1 op rs2`.
    ///
    /// `op` is one of `Add`, `Sub`, `Mul`, `And`, `Or`, `Xor`.
    Alu {
        /// Operation performed by the ALU.
        op: AluOp,
        /// Destination register.
        rd: u8,
        /// First source register.
        rs1: u8,
        /// Second source register.
        rs2: u8,
    },
    /// `rd = rd + 1`.
    Inc {
        /// Register incremented in place.
        rd: u8,
    },
    /// `rd = !rs1`.
    Not {
        /// Destination register.
        rd: u8,
        /// Source register.
        rs1: u8,
    },
    /// `rd = DMEM[base + offset]`.
    Load {
        /// Destination register.
        rd: u8,
        /// Address base register.
        base: u8,
        /// Unsigned 4-bit displacement.
        offset: u8,
    },
    /// `DMEM[base + offset] = src`.
    Store {
        /// Register whose value is stored.
        src: u8,
        /// Address base register.
        base: u8,
        /// Unsigned 4-bit displacement.
        offset: u8,
    },
    /// Unconditional jump by a signed 8-bit offset in instruction units.
    Jmp {
        /// Raw two's complement offset.
        offset: u8,
    },
    /// Branch by a signed 8-bit offset when `rs` is zero.
    Beqz {
        /// Tested register.
        rs: u8,
        /// Raw two's complement offset.
        offset: u8,
    },
    /// Stop the processor once this reaches writeback.
    Hlt,
}

fn field(inst: u16, shift: u16, mask: u16) -> u8 {
    ((inst >> shift) & mask) as u8
}

/// Decodes a raw instruction word.
///
/// # Errors
///
/// Returns [`SimError::IllegalInstruction`] for the unassigned opcode values
/// `0xC`, `0xD`, and `0xE`.
pub fn decode(pc: u16, inst: u16) -> Result<Instruction, SimError> {
    let r1 = field(inst, R1_SHIFT, NIBBLE_MASK);
    let r2 = field(inst, R2_SHIFT, NIBBLE_MASK);
    let r3 = field(inst, 0, NIBBLE_MASK);

    let alu = |op| Instruction::Alu {
        op,
        rd: r1,
        rs1: r2,
        rs2: r3,
    };

    let decoded = match inst >> OPCODE_SHIFT {
        OP_ADD => alu(AluOp::Add),
        OP_SUB => alu(AluOp::Sub),
        OP_MUL => alu(AluOp::Mul),
        OP_AND => alu(AluOp::And),
        OP_OR => alu(AluOp::Or),
        OP_XOR => alu(AluOp::Xor),
        OP_INC => Instruction::Inc { rd: r1 },
        OP_NOT => Instruction::Not { rd: r1, rs1: r2 },
        OP_LOAD => Instruction::Load {
            rd: r1,
            base: r2,
            offset: r3,
        },
        OP_STORE => Instruction::Store {
            src: r1,
            base: r2,
            offset: r3,
        },
        OP_JMP => Instruction::Jmp {
            offset: field(inst, JMP_OFFSET_SHIFT, OFFSET_MASK),
        },
        OP_BEQZ => Instruction::Beqz {
            rs: r1,
            offset: field(inst, 0, OFFSET_MASK),
        },
        OP_HLT => Instruction::Hlt,
        _ => return Err(SimError::IllegalInstruction { pc, inst }),
    };
    Ok(decoded)
}

impl Instruction {
    /// Returns the statistics class of the instruction.
    pub fn class(&self) -> InstClass {
        match self {
            Instruction::Alu { op, .. } => op.class(),
            Instruction::Inc { .. } => InstClass::Arithmetic,
            Instruction::Not { .. } => InstClass::Logical,
            Instruction::Load { .. } | Instruction::Store { .. } => InstClass::Data,
            Instruction::Jmp { .. } | Instruction::Beqz { .. } => InstClass::Control,
            Instruction::Hlt => InstClass::Halt,
        }
    }

    /// Returns the registers read by the instruction.
    ///
    /// These are the registers whose pending flags gate decode.
    pub fn sources(&self) -> Vec<usize> {
        match *self {
            Instruction::Alu { rs1, rs2, .. } => vec![rs1 as usize, rs2 as usize],
            Instruction::Inc { rd } => vec![rd as usize],
            Instruction::Not { rs1, .. } => vec![rs1 as usize],
            Instruction::Load { base, .. } => vec![base as usize],
            Instruction::Store { src, base, .. } => vec![base as usize, src as usize],
            Instruction::Beqz { rs, .. } => vec![rs as usize],
            Instruction::Jmp { .. } | Instruction::Hlt => Vec::new(),
        }
    }

    /// Returns the register written at writeback, if any.
    pub fn dest(&self) -> Option<usize> {
        match *self {
            Instruction::Alu { rd, .. }
            | Instruction::Inc { rd }
            | Instruction::Not { rd, .. }
            | Instruction::Load { rd, .. } => Some(rd as usize),
            _ => None,
        }
    }

    /// Encodes the instruction back into its 16-bit word.
    ///
    /// Register and displacement fields are truncated to four bits.
    pub fn encode(&self) -> u16 {
        let pack = |op: u16, a: u8, b: u8, c: u8| {
            (op << OPCODE_SHIFT)
                | ((a as u16 & NIBBLE_MASK) << R1_SHIFT)
                | ((b as u16 & NIBBLE_MASK) << R2_SHIFT)
                | (c as u16 & NIBBLE_MASK)
        };
        match *self {
            Instruction::Alu { op, rd, rs1, rs2 } => pack(op.opcode(), rd, rs1, rs2),
            Instruction::Inc { rd } => pack(OP_INC, rd, 0, 0),
            Instruction::Not { rd, rs1 } => pack(OP_NOT, rd, rs1, 0),
            Instruction::Load { rd, base, offset } => pack(OP_LOAD, rd, base, offset),
            Instruction::Store { src, base, offset } => pack(OP_STORE, src, base, offset),
            Instruction::Jmp { offset } => {
                (OP_JMP << OPCODE_SHIFT) | ((offset as u16) << JMP_OFFSET_SHIFT)
            }
            Instruction::Beqz { rs, offset } => {
                (OP_BEQZ << OPCODE_SHIFT)
                    | ((rs as u16 & NIBBLE_MASK) << R1_SHIFT)
                    | offset as u16
            }
            Instruction::Hlt => OP_HLT << OPCODE_SHIFT,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Alu { op, rd, rs1, rs2 } => {
                write!(f, "{} r{}, r{}, r{}", op.mnemonic(), rd, rs1, rs2)
            }
            Instruction::Inc { rd } => write!(f, "INC r{}", rd),
            Instruction::Not { rd, rs1 } => write!(f, "NOT r{}, r{}", rd, rs1),
            Instruction::Load { rd, base, offset } => {
                write!(f, "LOAD r{}, (r{}+{})", rd, base, offset)
            }
            Instruction::Store { src, base, offset } => {
                write!(f, "STORE r{}, (r{}+{})", src, base, offset)
            }
            Instruction::Jmp { offset } => write!(f, "JMP {}", offset as i8),
            Instruction::Beqz { rs, offset } => write!(f, "BEQZ r{}, {}", rs, offset as i8),
            Instruction::Hlt => f.write_str("HLT"),
        }
    }
}
