//! Opcode values and instruction field layout.
//!
//! Field positions (bit 15 is the most significant):
//!
//! | Opcode       | [15:12] | [11:8] | [7:4] | [3:0] |
//! |--------------|---------|--------|-------|-------|
//! | ADD SUB MUL AND OR XOR | op | rd | rs1 | rs2 |
//! | INC          | op      | rd     | -     | -     |
//! | NOT          | op      | rd     | rs1   | -     |
//! | LOAD         | op      | rd     | base  | off4  |
//! | STORE        | op      | src    | base  | off4  |
//! | JMP          | op      | off8 (bits 11:4)      | - |
//! | BEQZ         | op      | rs     | off8 (bits 7:0) |
//! | HLT          | op      | -      | -     | -     |

/// Integer addition.
pub const OP_ADD: u16 = 0x0;
/// Integer subtraction.
pub const OP_SUB: u16 = 0x1;
/// Integer multiplication (low byte).
pub const OP_MUL: u16 = 0x2;
/// Increment a register in place.
pub const OP_INC: u16 = 0x3;
/// Bitwise AND.
pub const OP_AND: u16 = 0x4;
/// Bitwise OR.
pub const OP_OR: u16 = 0x5;
/// Bitwise complement.
pub const OP_NOT: u16 = 0x6;
/// Bitwise XOR.
pub const OP_XOR: u16 = 0x7;
/// Load a byte from the data store.
pub const OP_LOAD: u16 = 0x8;
/// Store a byte to the data store.
pub const OP_STORE: u16 = 0x9;
/// Unconditional PC-relative jump.
pub const OP_JMP: u16 = 0xA;
/// Branch if the tested register is zero.
pub const OP_BEQZ: u16 = 0xB;
/// Halt the processor.
pub const OP_HLT: u16 = 0xF;

/// Width of an instruction in bytes.
pub const INST_BYTES: u16 = 2;

/// Shift of the opcode field.
pub const OPCODE_SHIFT: u16 = 12;
/// Shift of the first register field.
pub const R1_SHIFT: u16 = 8;
/// Shift of the second register field.
pub const R2_SHIFT: u16 = 4;
/// Shift of the `JMP` offset field.
pub const JMP_OFFSET_SHIFT: u16 = 4;

/// Mask of a 4-bit field after shifting.
pub const NIBBLE_MASK: u16 = 0xf;
/// Mask of an 8-bit offset after shifting.
pub const OFFSET_MASK: u16 = 0xff;

/// Sign bit of the 8-bit control-flow offset.
pub const OFFSET_SIGN_BIT: u8 = 0x80;
