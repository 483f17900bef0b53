//! Pipeline control signals and operation types.
//!
//! This module defines the ALU operation selector carried from decode to
//! execute, and the two pieces of control state that gate the stages each
//! cycle: the stage-run flags and the stall latches.

use crate::isa::opcodes;
use crate::isa::InstClass;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    #[default]
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Wrapping multiplication.
    Mul,
    /// Increment by one.
    Inc,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise complement of the first operand.
    Not,
    /// Bitwise XOR.
    Xor,
}

impl AluOp {
    /// Statistics class of the instruction using this operation.
    pub fn class(self) -> InstClass {
        match self {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Inc => InstClass::Arithmetic,
            AluOp::And | AluOp::Or | AluOp::Not | AluOp::Xor => InstClass::Logical,
        }
    }

    /// Opcode value that selects this operation.
    pub fn opcode(self) -> u16 {
        match self {
            AluOp::Add => opcodes::OP_ADD,
            AluOp::Sub => opcodes::OP_SUB,
            AluOp::Mul => opcodes::OP_MUL,
            AluOp::Inc => opcodes::OP_INC,
            AluOp::And => opcodes::OP_AND,
            AluOp::Or => opcodes::OP_OR,
            AluOp::Not => opcodes::OP_NOT,
            AluOp::Xor => opcodes::OP_XOR,
        }
    }

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::Mul => "MUL",
            AluOp::Inc => "INC",
            AluOp::And => "AND",
            AluOp::Or => "OR",
            AluOp::Not => "NOT",
            AluOp::Xor => "XOR",
        }
    }
}

/// Per-stage run flags.
///
/// A stage acts in a cycle only if its flag is set. The producing stage sets
/// the flag of the next stage; the consuming stage clears its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageFlags {
    /// Fetch may run.
    pub fetch: bool,
    /// The IF/ID latch holds an instruction waiting for decode.
    pub decode: bool,
    /// The ID/EX latch holds an instruction waiting for execute.
    pub execute: bool,
    /// The EX/MEM latch holds an instruction waiting for memory.
    pub memory: bool,
    /// The MEM/WB latch holds an instruction waiting for writeback.
    pub writeback: bool,
}

impl Default for StageFlags {
    /// Initial configuration: only fetch enabled.
    fn default() -> Self {
        Self {
            fetch: true,
            decode: false,
            execute: false,
            memory: false,
            writeback: false,
        }
    }
}

/// Stall latches holding a control-flow instruction in place.
///
/// Both are raised while a jump or branch is travelling from decode to
/// memory, and both drop when memory resolves it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallLatches {
    /// Decode (and therefore fetch) is frozen.
    pub decode: bool,
    /// Execute is frozen.
    pub execute: bool,
}
