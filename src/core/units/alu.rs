//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the byte-wide ALU used in the Execute stage, the
//! load/store effective-address adder, and the control-flow target adder
//! with its offset sign extension.

use crate::core::pipeline::signals::AluOp;
use crate::isa::opcodes::OFFSET_SIGN_BIT;

/// Arithmetic Logic Unit (ALU) for register and address operations.
pub struct Alu;

impl Alu {
    /// Executes an ALU operation on byte operands.
    ///
    /// Arithmetic wraps at 8 bits. `Inc` and `Not` use only `a`.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a` - First operand
    /// * `b` - Second operand (ignored by single-operand operations)
    pub fn execute(op: AluOp, a: u8, b: u8) -> u8 {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Mul => a.wrapping_mul(b),
            AluOp::Inc => a.wrapping_add(1),
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Not => !a,
            AluOp::Xor => a ^ b,
        }
    }

    /// Computes a load/store address, wrapping within the 256-byte store.
    pub fn effective_address(base: u8, offset: u8) -> u8 {
        base.wrapping_add(offset)
    }

    /// Sign-extends an 8-bit control-flow offset to the 16-bit address width.
    ///
    /// Bit 7 marks a negative offset.
    pub fn sign_extend(offset: u8) -> u16 {
        if offset & OFFSET_SIGN_BIT != 0 {
            0xff00 | offset as u16
        } else {
            offset as u16
        }
    }

    /// Computes `pc + (sext(offset) << 1)`, wrapping at 16 bits.
    ///
    /// `pc` is the snapshot taken at decode, already past the control
    /// instruction.
    pub fn branch_target(pc: u16, offset: u8) -> u16 {
        pc.wrapping_add(Self::sign_extend(offset) << 1)
    }
}
