//! Whole-program scenarios run through the cycle driver.
//!
//! Programs are loaded at the reset PC (word 16); data lives below it.

use crate::common::builder::instruction::{addi, andi, beqz, halt, j, lw, noop, sub, sw};
use crate::common::harness::TestContext;
use tomasim_core::core::btb::BranchHistory;
use tomasim_core::SimError;

#[test]
fn noop_then_halt_terminates_quickly() {
    let mut ctx = TestContext::new().load_program(&[noop(), halt()]);
    let cycles = ctx.run_to_halt(8);

    assert!(cycles <= 8);
    assert!(ctx.machine.reg_file.iter().all(|&r| r == 0));
}

#[test]
fn addi_chain_forwards_through_the_rob() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 5), // r1 = 5
        addi(2, 1, 7), // r2 = r1 + 7, operand arrives over the CDB
        halt(),
    ]);
    ctx.run_to_halt(50);

    assert_eq!(ctx.get_reg(1), 5);
    assert_eq!(ctx.get_reg(2), 12);
}

#[test]
fn lw_sw_round_trip() {
    let mut ctx = TestContext::new().with_word(0, 42).load_program(&[
        lw(1, 0, 0), // r1 = memory[0]
        sw(1, 0, 1), // memory[1] = r1
        halt(),
    ]);
    ctx.run_to_halt(50);

    assert_eq!(ctx.get_reg(1), 42);
    assert_eq!(ctx.read_mem(1), 42);
}

#[test]
fn rr_alu_subtract() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 10),
        addi(2, 0, 3),
        sub(3, 1, 2),
        halt(),
    ]);
    ctx.run_to_halt(50);

    assert_eq!(ctx.get_reg(3), 7);
}

#[test]
fn andi_masks_value() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 0xFF),
        andi(2, 1, 0x0F),
        halt(),
    ]);
    ctx.run_to_halt(50);

    assert_eq!(ctx.get_reg(2), 0x0F);
}

#[test]
fn negative_immediates_wrap() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 5),
        addi(2, 1, -9), // r2 = 5 - 9
        halt(),
    ]);
    ctx.run_to_halt(50);

    assert_eq!(ctx.get_reg(2), (-4i32) as u32);
}

#[test]
fn mispredicted_branch_squashes_wrong_path() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 0),  // r1 = 0, so the branch is taken
        beqz(1, 1),     // to the landing pad two words down
        addi(2, 0, 99), // wrong path, must be squashed
        addi(3, 0, 7),  // landing pad
        halt(),
    ]);
    ctx.run_to_halt(100);

    assert_eq!(ctx.get_reg(2), 0, "wrong-path write must not retire");
    assert_eq!(ctx.get_reg(3), 7);
    assert_eq!(ctx.machine.stats.branch_mispredictions, 1);

    let tracked: Vec<_> = ctx
        .machine
        .btb
        .entries()
        .iter()
        .filter(|e| e.valid)
        .collect();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0].branch_pc, 17);
}

#[test]
fn correctly_predicted_branch_does_not_squash() {
    // r1 is nonzero, so the branch falls through; with an empty BTB the
    // speculative next PC is the fall-through, which is correct.
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1),
        beqz(1, 1),
        addi(2, 0, 5),
        halt(),
    ]);
    ctx.run_to_halt(100);

    assert_eq!(ctx.get_reg(2), 5);
    assert_eq!(ctx.machine.stats.branch_resolutions, 1);
    assert_eq!(ctx.machine.stats.branch_mispredictions, 0);
}

#[test]
fn unconditional_jump_skips_dead_code() {
    let mut ctx = TestContext::new().load_program(&[
        j(2),          // to pc + 2 + 1 = word 19
        addi(1, 0, 1), // unreachable
        addi(1, 0, 2), // unreachable
        addi(1, 0, 9),
        halt(),
    ]);
    ctx.run_to_halt(50);

    assert_eq!(ctx.get_reg(1), 9);
}

#[test]
fn loop_branch_trains_the_btb() {
    // One trip through a counted loop. The exit branch resolves twice:
    // not-taken on the first encounter (installing a not-taken entry), taken
    // on the second (mispredicted, then weakened toward taken).
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1),  // 16: r1 = 1
        beqz(1, 2),     // 17: exit to 20 when r1 == 0
        addi(1, 1, -1), // 18: r1 -= 1
        j(-3),          // 19: back to 17
        halt(),         // 20
    ]);
    ctx.run_to_halt(200);

    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.machine.stats.branch_resolutions, 2);
    assert_eq!(ctx.machine.stats.branch_mispredictions, 1);

    let entry = ctx
        .machine
        .btb
        .entries()
        .iter()
        .find(|e| e.valid && e.branch_pc == 17)
        .expect("loop branch must be tracked");
    assert_eq!(entry.target_pc, 20);
    assert_eq!(entry.history, BranchHistory::WeakNot);
}

#[test]
fn store_write_is_deferred_until_commit() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 77),
        sw(1, 0, 3),
        halt(),
    ]);

    let mut first_visible = None;
    let mut halt_cycle = None;
    for _ in 0..100 {
        let halted = ctx.step();
        if first_visible.is_none() && ctx.read_mem(3) == 77 {
            first_visible = Some(ctx.machine.cycles);
        }
        if halted {
            halt_cycle = Some(ctx.machine.cycles);
            break;
        }
    }

    let first_visible = first_visible.expect("store never reached memory");
    let halt_cycle = halt_cycle.expect("machine never halted");
    assert!(first_visible < halt_cycle);
    // The write needs the producing ADDI to retire plus the store's own
    // transfer and drain cycles at the ROB head; it cannot land early.
    assert!(first_visible >= 6, "store drained at cycle {}", first_visible);
}

#[test]
fn invalid_opcode_is_fatal_with_context() {
    let mut ctx = TestContext::new().load_program(&[63u32 << 26, halt()]);

    let err = ctx.machine.next_step().unwrap_err();
    assert_eq!(err, SimError::InvalidOpcode { opcode: 63, pc: 16 });
}
