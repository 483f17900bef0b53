//! Pipeline latch structures for inter-stage communication.
//!
//! Each latch holds at most one instruction. Payloads after decode are split
//! per opcode class so that, for example, a branch target never shares a
//! field with an arithmetic result.

use crate::core::pipeline::signals::AluOp;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Instruction;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Address the instruction was fetched from.
    pub pc: u16,
    /// Raw 16-bit instruction word.
    pub inst: u16,
}

/// Work handed from decode to execute, one variant per opcode class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecOp {
    /// Register arithmetic or logic. Single-operand forms ignore `b`.
    Alu {
        /// Operation to perform.
        op: AluOp,
        /// Destination register.
        rd: u8,
        /// First operand value.
        a: u8,
        /// Second operand value.
        b: u8,
    },
    /// Load: address is `base + offset`.
    Load {
        /// Destination register.
        rd: u8,
        /// Base register value.
        base: u8,
        /// Displacement.
        offset: u8,
    },
    /// Store: `value` goes to `base + offset`.
    Store {
        /// Value read from the source register at decode.
        value: u8,
        /// Base register value.
        base: u8,
        /// Displacement.
        offset: u8,
    },
    /// Unconditional jump.
    Jump {
        /// PC captured at decode (address of the jump + 2).
        pc: u16,
        /// Raw 8-bit offset.
        offset: u8,
    },
    /// Branch if `test` is zero.
    Branch {
        /// PC captured at decode (address of the branch + 2).
        pc: u16,
        /// Raw 8-bit offset.
        offset: u8,
        /// Value of the tested register.
        test: u8,
    },
    /// Halt.
    Halt,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Address of the instruction.
    pub pc: u16,
    /// Decoded instruction, kept for statistics and tracing.
    pub inst: Instruction,
    /// Operand values and class-specific fields.
    pub op: ExecOp,
}

/// Work handed from execute to memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemOp {
    /// Register result that passes through memory untouched.
    Alu {
        /// Destination register.
        rd: u8,
        /// ALU result.
        result: u8,
    },
    /// Read the byte at `addr` for `rd`.
    Load {
        /// Destination register.
        rd: u8,
        /// Effective address.
        addr: u8,
    },
    /// Write `value` to `addr`.
    Store {
        /// Effective address.
        addr: u8,
        /// Byte to write.
        value: u8,
    },
    /// Resolved control-flow target; equal to the snapshot PC when not taken.
    Redirect {
        /// Next PC.
        target: u16,
    },
    /// Halt.
    Halt,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Address of the instruction.
    pub pc: u16,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Memory-stage work.
    pub op: MemOp,
}

/// Work handed from memory to writeback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WbOp {
    /// Commit an ALU result.
    Alu {
        /// Destination register.
        rd: u8,
        /// ALU result.
        result: u8,
    },
    /// Commit a loaded byte.
    Load {
        /// Destination register.
        rd: u8,
        /// Byte read from the data store.
        data: u8,
    },
    /// Store already done; nothing to commit.
    Store,
    /// Stop the run.
    Halt,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Address of the instruction.
    pub pc: u16,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Writeback work.
    pub op: WbOp,
}

/// IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfId {
    /// Fetched instruction, if any.
    pub entry: Option<IfIdEntry>,
}

/// ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdEx {
    /// Decoded instruction, if any.
    pub entry: Option<IdExEntry>,
}

/// EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExMem {
    /// Executed instruction, if any.
    pub entry: Option<ExMemEntry>,
}

/// MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemWb {
    /// Instruction awaiting writeback, if any.
    pub entry: Option<MemWbEntry>,
}

macro_rules! impl_latch {
    ($($latch:ty),*) => {
        $(
            impl PipelineLatch for $latch {
                fn flush(&mut self) {
                    self.entry = None;
                }

                fn is_empty(&self) -> bool {
                    self.entry.is_none()
                }
            }
        )*
    };
}

impl_latch!(IfId, IdEx, ExMem, MemWb);
