//! Tests for per-stage pipeline behaviour.
//!
//! Programs are assembled from raw instruction words and stepped either to
//! completion or one cycle at a time.

use pipeline_sim::common::reg::NUM_REGS;
use pipeline_sim::common::{AccessType, RegisterFile, SimError};
use pipeline_sim::config::{Config, GeneralConfig};
use pipeline_sim::core::pipeline::hazards;
use pipeline_sim::core::pipeline::latches::{IfIdEntry, MemOp};
use pipeline_sim::core::pipeline::traits::PipelineLatch;
use pipeline_sim::core::pipeline::{StageFlags, StallLatches};
use pipeline_sim::core::Cpu;
use pipeline_sim::isa::decode;
use pipeline_sim::soc::System;
use pretty_assertions::assert_eq;

const HLT: u16 = 0xf000;

fn assemble(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

fn machine_with(words: &[u16], data: &[u8], init: &[(usize, u8)], config: &Config) -> Cpu {
    let system = System::from_images(&assemble(words), data).unwrap();
    let mut values = [0u8; NUM_REGS];
    for &(reg, val) in init {
        values[reg] = val;
    }
    Cpu::new(system, RegisterFile::with_values(values), config)
}

fn machine(words: &[u16], data: &[u8], init: &[(usize, u8)]) -> Cpu {
    machine_with(words, data, init, &Config::default())
}

fn reg(cpu: &Cpu, idx: usize) -> u8 {
    cpu.regs.read(idx).unwrap()
}

/// Tests hazard detection against pending flags.
#[test]
fn test_hazard_detection() {
    let mut regs = RegisterFile::new();
    let store = decode(0, 0x9230).unwrap();
    assert_eq!(hazards::pending_source(&regs, &store).unwrap(), None);

    regs.set_pending(2, true).unwrap();
    assert_eq!(hazards::pending_source(&regs, &store).unwrap(), Some(2));

    regs.set_pending(3, true).unwrap();
    assert_eq!(hazards::pending_source(&regs, &store).unwrap(), Some(3));

    let jmp = decode(0, 0xa010).unwrap();
    assert_eq!(hazards::pending_source(&regs, &jmp).unwrap(), None);
}

/// Tests the fill latency of a hazard-free program.
#[test]
fn test_independent_instructions_no_stalls() {
    // ADD r1..r6 = r2 + r3, none depending on another
    let mut cpu = machine(
        &[0x0123, 0x0423, 0x0523, 0x0623, HLT],
        &[],
        &[(2, 2), (3, 3)],
    );
    cpu.run().unwrap();
    assert_eq!(cpu.stats.cycles, 9);
    assert_eq!(cpu.stats.instructions, 5);
    assert_eq!(cpu.stats.total_stalls(), 0);
    assert_eq!(reg(&cpu, 1), 5);
    assert_eq!(reg(&cpu, 6), 5);
}

/// Tests that an adjacent producer and consumer stall twice.
#[test]
fn test_raw_adjacent_stalls() {
    // ADD r1, r2, r3; ADD r4, r1, r1
    let mut cpu = machine(&[0x0123, 0x0411, HLT], &[], &[(2, 2), (3, 3)]);
    cpu.run().unwrap();
    assert_eq!(cpu.stats.stalls_data, 2);
    assert_eq!(cpu.stats.stalls_control, 0);
    assert_eq!(cpu.stats.cycles, 9);
    assert_eq!(reg(&cpu, 1), 5);
    assert_eq!(reg(&cpu, 4), 10);
}

/// Tests that a consumer two instructions behind stalls once.
#[test]
fn test_raw_distance_two_stalls_once() {
    // ADD r1, r2, r3; ADD r5, r2, r3; ADD r4, r1, r1
    let mut cpu = machine(&[0x0123, 0x0523, 0x0411, HLT], &[], &[(2, 2), (3, 3)]);
    cpu.run().unwrap();
    assert_eq!(cpu.stats.stalls_data, 1);
    assert_eq!(reg(&cpu, 4), 10);
}

/// Tests that a stalled consumer stays in decode and execute stays idle.
#[test]
fn test_raw_stall_holds_decode() {
    let mut cpu = machine(&[0x0123, 0x0411, HLT], &[], &[(2, 2), (3, 3)]);
    cpu.tick().unwrap();
    cpu.tick().unwrap();
    assert!(cpu.regs.is_pending(1).unwrap());

    cpu.tick().unwrap();
    assert_eq!(cpu.stats.stalls_data, 1);
    assert!(cpu.run.decode);
    assert!(!cpu.run.execute);
    assert_eq!(
        cpu.if_id.entry,
        Some(IfIdEntry {
            pc: 2,
            inst: 0x0411
        })
    );
    assert_eq!(cpu.pc, 4);

    cpu.tick().unwrap();
    cpu.tick().unwrap();
    assert!(!cpu.regs.is_pending(1).unwrap());
    assert!(cpu.run.execute);
    assert!(cpu.regs.is_pending(4).unwrap());
}

/// Tests that STORE waits for both its base and its value.
#[test]
fn test_store_waits_for_value() {
    // INC r2; STORE r2, (r0+4)
    let mut cpu = machine(&[0x3200, 0x9204, HLT], &[], &[(2, 0x29)]);
    cpu.run().unwrap();
    assert_eq!(cpu.stats.stalls_data, 2);
    assert_eq!(cpu.bus.dcache.read_u8(4).unwrap(), 0x2a);
}

/// Tests a store followed by a load of the same address.
#[test]
fn test_store_then_load() {
    // STORE r2, (r0+4); LOAD r3, (r0+4)
    let mut cpu = machine(&[0x9204, 0x8304, HLT], &[], &[(2, 0x2a)]);
    cpu.run().unwrap();
    assert_eq!(cpu.stats.stalls_data, 0);
    assert_eq!(reg(&cpu, 3), 0x2a);
}

/// Tests that load addresses wrap within the data store.
#[test]
fn test_load_address_wraps() {
    // LOAD r2, (r1+3)
    let mut cpu = machine(&[0x8213, HLT], &[0x00, 0x77], &[(1, 0xfe)]);
    cpu.run().unwrap();
    assert_eq!(reg(&cpu, 2), 0x77);
}

/// Tests that INC and NOT read their single source.
#[test]
fn test_single_operand_forms() {
    // INC r1; NOT r2, r1
    let mut cpu = machine(&[0x3100, 0x6210, HLT], &[], &[(1, 0x0f)]);
    cpu.run().unwrap();
    assert_eq!(reg(&cpu, 1), 0x10);
    assert_eq!(reg(&cpu, 2), 0xef);
    assert_eq!(cpu.stats.stalls_data, 2);
    assert_eq!(cpu.stats.inst_arithmetic, 1);
    assert_eq!(cpu.stats.inst_logical, 1);
}

/// Tests that r0 stays zero when targeted, and that its readers still wait.
#[test]
fn test_r0_destination() {
    // ADD r0, r1, r1; ADD r2, r0, r0
    let mut cpu = machine(&[0x0011, 0x0200, HLT], &[], &[(1, 4), (2, 9)]);
    cpu.run().unwrap();
    assert_eq!(reg(&cpu, 0), 0);
    assert_eq!(reg(&cpu, 2), 0);
    assert_eq!(cpu.stats.stalls_data, 2);
    assert!(!cpu.regs.is_pending(0).unwrap());
}

/// Tests a taken jump: two control stalls and fetch resumes at the target.
#[test]
fn test_jump_redirect() {
    // JMP +1; INC r1 (skipped); HLT
    let mut cpu = machine(&[0xa010, 0x3100, HLT], &[], &[(1, 7)]);

    cpu.tick().unwrap();
    cpu.tick().unwrap();
    assert!(cpu.stall.decode);
    assert_eq!(cpu.stats.stalls_control, 2);
    assert_eq!(cpu.pc, 2);

    cpu.tick().unwrap();
    assert!(cpu.stall.execute);
    assert_eq!(
        cpu.ex_mem.entry.map(|e| e.op),
        Some(MemOp::Redirect { target: 4 })
    );
    assert_eq!(cpu.pc, 2);

    cpu.tick().unwrap();
    assert_eq!(
        cpu.if_id.entry,
        Some(IfIdEntry { pc: 4, inst: HLT })
    );
    assert_eq!(cpu.pc, 6);

    cpu.run().unwrap();
    assert_eq!(reg(&cpu, 1), 7);
    assert_eq!(cpu.stats.instructions, 2);
    assert_eq!(cpu.stats.inst_control, 1);
    assert_eq!(cpu.stats.stalls_control, 2);
    assert_eq!(cpu.stats.cycles, 8);
}

/// Tests that a redirect empties the younger latches and resets control state.
#[test]
fn test_flush_on_redirect() {
    let mut cpu = machine(&[0xa010, 0x3100, HLT], &[], &[]);
    for _ in 0..4 {
        cpu.tick().unwrap();
    }
    assert!(cpu.id_ex.is_empty());
    assert!(cpu.ex_mem.is_empty());
    assert!(cpu.mem_wb.is_empty());
    assert!(!cpu.if_id.is_empty());
    assert_eq!(cpu.stall, StallLatches::default());
    assert_eq!(
        cpu.run,
        StageFlags {
            fetch: true,
            decode: true,
            execute: false,
            memory: false,
            writeback: false,
        }
    );
}

/// Tests that flushing clears every latch.
#[test]
fn test_flush_clears_latches() {
    let mut cpu = machine(&[0x0123, 0x0423, 0x0523, HLT], &[], &[]);
    for _ in 0..3 {
        cpu.tick().unwrap();
    }
    assert!(!cpu.if_id.is_empty());
    assert!(!cpu.id_ex.is_empty());
    cpu.flush();
    assert!(cpu.if_id.is_empty());
    assert!(cpu.id_ex.is_empty());
    assert!(cpu.ex_mem.is_empty());
    assert!(cpu.mem_wb.is_empty());
    assert_eq!(cpu.run, StageFlags::default());
    assert!(cpu.pipeline_empty());
}

/// Tests a backward jump.
#[test]
fn test_jump_backward() {
    // 0: JMP +1 (to 4); 2: HLT; 4: JMP -2 (to 2)
    let mut cpu = machine(&[0xa010, HLT, 0xafe0], &[], &[]);
    cpu.run().unwrap();
    assert_eq!(cpu.stats.inst_control, 2);
    assert_eq!(cpu.stats.stalls_control, 4);
    assert_eq!(cpu.stats.instructions, 3);
}

/// Tests a branch whose register is zero.
#[test]
fn test_beqz_taken() {
    // BEQZ r1, +1; INC r2 (skipped); HLT
    let mut cpu = machine(&[0xb101, 0x3200, HLT], &[], &[]);
    cpu.run().unwrap();
    assert_eq!(reg(&cpu, 2), 0);
    assert_eq!(cpu.stats.cycles, 8);
    assert_eq!(cpu.stats.stalls_control, 2);
}

/// Tests a branch whose register is nonzero falls through without a flush.
#[test]
fn test_beqz_not_taken() {
    // BEQZ r1, +1; INC r2; HLT
    let mut cpu = machine(&[0xb101, 0x3200, HLT], &[], &[(1, 1)]);
    for _ in 0..4 {
        cpu.tick().unwrap();
    }
    assert_eq!(cpu.stall, StallLatches::default());
    assert_eq!(
        cpu.if_id.entry,
        Some(IfIdEntry {
            pc: 2,
            inst: 0x3200
        })
    );

    cpu.run().unwrap();
    assert_eq!(reg(&cpu, 2), 1);
    assert_eq!(cpu.stats.cycles, 9);
    assert_eq!(cpu.stats.stalls_control, 2);
    assert_eq!(cpu.stats.inst_control, 1);
}

/// Tests that a branch on a pending register waits for the committed value.
#[test]
fn test_beqz_waits_for_pending() {
    // NOT r1, r0 (r1 = 0xff); BEQZ r1, +1; INC r2; HLT
    // A stale read of r1 == 0 would skip the INC.
    let mut cpu = machine(&[0x6100, 0xb101, 0x3200, HLT], &[], &[]);
    cpu.run().unwrap();
    assert_eq!(cpu.stats.stalls_data, 2);
    assert_eq!(cpu.stats.stalls_control, 2);
    assert_eq!(reg(&cpu, 2), 1);
}

/// Tests a counted loop built from a branch and a backward jump.
#[test]
fn test_countdown_loop() {
    // 0: SUB r1, r1, r2; 2: BEQZ r1, +1; 4: JMP -3; 6: HLT
    let mut cpu = machine(&[0x1112, 0xb101, 0xafd0, HLT], &[], &[(1, 3), (2, 1)]);
    cpu.run().unwrap();
    assert_eq!(reg(&cpu, 1), 0);
    assert_eq!(cpu.stats.inst_arithmetic, 3);
    assert_eq!(cpu.stats.inst_control, 5);
    assert_eq!(cpu.stats.inst_halt, 1);
    assert_eq!(cpu.stats.instructions, 9);
    assert_eq!(cpu.stats.stalls_control, 10);
    assert_eq!(cpu.stats.stalls_data, 6);
}

/// Tests that HLT stops fetch and that a halted CPU ignores ticks.
#[test]
fn test_halt() {
    let mut cpu = machine(&[HLT, 0x3100], &[], &[]);
    cpu.tick().unwrap();
    cpu.tick().unwrap();
    assert!(!cpu.run.fetch);
    assert_eq!(cpu.pc, 2);

    cpu.run().unwrap();
    assert!(cpu.halted);
    assert_eq!(cpu.stats.cycles, 5);
    assert_eq!(cpu.stats.inst_halt, 1);
    assert_eq!(reg(&cpu, 1), 0);
    assert!(cpu.pipeline_empty());

    cpu.tick().unwrap();
    assert_eq!(cpu.stats.cycles, 5);
}

/// Tests that a halt with a stage still occupied is reported.
#[test]
fn test_halt_with_work_in_flight() {
    let mut cpu = machine(&[HLT], &[], &[]);
    cpu.halted = true;
    cpu.run.execute = true;
    assert!(!cpu.pipeline_empty());
    assert!(matches!(cpu.run(), Err(SimError::PipelineInvariant(_))));
}

/// Tests that an unassigned opcode aborts the run.
#[test]
fn test_illegal_instruction() {
    let mut cpu = machine(&[0x0123, 0xd000, HLT], &[], &[]);
    match cpu.run() {
        Err(SimError::IllegalInstruction { pc, inst }) => {
            assert_eq!(pc, 2);
            assert_eq!(inst, 0xd000);
        }
        other => panic!("expected IllegalInstruction, got {:?}", other),
    }
    assert!(!cpu.halted);
}

/// Tests that running off the end of the instruction store is fatal.
#[test]
fn test_fetch_past_end() {
    let mut cpu = machine(&[], &[], &[]);
    assert!(matches!(
        cpu.run(),
        Err(SimError::AddressOutOfRange {
            access: AccessType::Fetch,
            addr: 256
        })
    ));
}

/// Tests that the cycle budget stops a program that never halts.
#[test]
fn test_cycle_limit() {
    let config = Config {
        general: GeneralConfig {
            trace_instructions: false,
            max_cycles: 20,
        },
        ..Config::default()
    };
    // JMP -1: jumps to itself
    let mut cpu = machine_with(&[0xaff0], &[], &[], &config);
    assert!(matches!(cpu.run(), Err(SimError::CycleLimitExceeded(20))));
    assert_eq!(cpu.stats.cycles, 20);
}
