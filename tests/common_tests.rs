//! Tests for the register file and error reporting.

use pipeline_sim::common::reg::NUM_REGS;
use pipeline_sim::common::{AccessType, RegisterFile, SimError};

/// Tests that a fresh register file is zeroed with nothing pending.
#[test]
fn test_register_file_new() {
    let regs = RegisterFile::new();
    for i in 0..NUM_REGS {
        assert_eq!(regs.read(i).unwrap(), 0);
        assert!(!regs.is_pending(i).unwrap());
    }
}

/// Tests basic write and read back.
#[test]
fn test_register_write_read() {
    let mut regs = RegisterFile::new();
    regs.write(5, 0xab).unwrap();
    regs.write(15, 0x01).unwrap();
    assert_eq!(regs.read(5).unwrap(), 0xab);
    assert_eq!(regs.read(15).unwrap(), 0x01);
}

/// Tests that writes to r0 are discarded.
#[test]
fn test_register_zero_hardwired() {
    let mut regs = RegisterFile::new();
    regs.write(0, 0x55).unwrap();
    assert_eq!(regs.read(0).unwrap(), 0);
}

/// Tests that initial values never reach r0.
#[test]
fn test_register_with_values_clears_r0() {
    let mut values = [0u8; NUM_REGS];
    values[0] = 9;
    values[3] = 3;
    let regs = RegisterFile::with_values(values);
    assert_eq!(regs.read(0).unwrap(), 0);
    assert_eq!(regs.read(3).unwrap(), 3);
    assert_eq!(regs.values()[3], 3);
}

/// Tests raising and clearing pending flags.
#[test]
fn test_register_pending_flags() {
    let mut regs = RegisterFile::new();
    regs.set_pending(7, true).unwrap();
    assert!(regs.is_pending(7).unwrap());
    assert!(!regs.is_pending(6).unwrap());
    regs.set_pending(7, false).unwrap();
    assert!(!regs.is_pending(7).unwrap());
}

/// Tests that a pending flag does not hide the committed value.
#[test]
fn test_register_pending_does_not_change_value() {
    let mut regs = RegisterFile::new();
    regs.write(2, 0x20).unwrap();
    regs.set_pending(2, true).unwrap();
    assert_eq!(regs.read(2).unwrap(), 0x20);
}

/// Tests bounds checking on every accessor.
#[test]
fn test_register_out_of_range() {
    let mut regs = RegisterFile::new();
    assert!(matches!(regs.read(16), Err(SimError::RegisterOutOfRange(16))));
    assert!(matches!(regs.write(16, 1), Err(SimError::RegisterOutOfRange(16))));
    assert!(matches!(regs.is_pending(20), Err(SimError::RegisterOutOfRange(20))));
    assert!(matches!(
        regs.set_pending(16, true),
        Err(SimError::RegisterOutOfRange(16))
    ));
}

/// Tests the fatal messages printed by the binary.
#[test]
fn test_error_display() {
    let err = SimError::IllegalInstruction {
        pc: 0x0004,
        inst: 0xc123,
    };
    assert_eq!(err.to_string(), "IllegalInstruction(0xc123) at pc 0x0004");

    let err = SimError::AddressOutOfRange {
        access: AccessType::Fetch,
        addr: 0x100,
    };
    assert_eq!(err.to_string(), "fetch access out of range at 0x0100");

    let err = SimError::MalformedToken {
        source_name: "RF.txt".to_string(),
        index: 2,
        token: "zz".to_string(),
    };
    assert_eq!(err.to_string(), "RF.txt: malformed hex token #2 'zz'");

    assert_eq!(
        SimError::CycleLimitExceeded(10).to_string(),
        "cycle limit of 10 exceeded without halting"
    );
}
