mod common;

use common::{run_until, setup, step};

#[test]
fn reset_vector_starts_execution() {
    // LDA #$42 ; STA $00 ; JMP $8004
    let (mut bus, mut cpu) = setup(&[0xa9, 0x42, 0x85, 0x00, 0x4c, 0x04, 0x80]);

    assert_eq!(cpu.pc(), 0x8000);
    for _ in 0..10 {
        step(&mut cpu, &mut bus);
    }

    assert_eq!(bus.cpu_read(0x0000), 0x42);
    assert_eq!(cpu.pc(), 0x8004);
}

#[test]
fn stack_lives_in_page_one() {
    // LDA #$37 ; PHA ; LDA #$00 ; PLA
    let (mut bus, mut cpu) = setup(&[0xa9, 0x37, 0x48, 0xa9, 0x00, 0x68]);

    let sp0 = cpu.sp();
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus); // PHA
    assert_eq!(cpu.sp(), sp0.wrapping_sub(1));
    assert_eq!(bus.cpu_read(0x0100 + sp0 as u16), 0x37);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a(), 0x00);
    step(&mut cpu, &mut bus); // PLA
    assert_eq!(cpu.a(), 0x37);
    assert_eq!(cpu.sp(), sp0);
}

#[test]
fn php_plp_round_trips_flags_without_b() {
    // SEC ; SED ; PHP ; CLC ; CLD ; PLP
    let (mut bus, mut cpu) = setup(&[0x38, 0xf8, 0x08, 0x18, 0xd8, 0x28]);

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    let sp0 = cpu.sp();
    step(&mut cpu, &mut bus); // PHP

    // pushed copy carries bits 4 and 5
    let pushed = bus.cpu_read(0x0100 + sp0 as u16);
    assert_eq!(pushed & 0x30, 0x30);
    assert_eq!(pushed & 0x09, 0x09); // C and D

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.status() & 0x09, 0x00);

    step(&mut cpu, &mut bus); // PLP
    assert_eq!(cpu.status() & 0x09, 0x09);
    assert_eq!(cpu.status() & 0x10, 0x00); // B is lost
}

#[test]
fn branch_cycle_costs() {
    // not taken: LDX #$00 ; BNE +2
    let (mut bus, mut cpu) = setup(&[0xa2, 0x00, 0xd0, 0x02]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 2);

    // taken, same page: LDX #$01 ; BNE +2
    let (mut bus, mut cpu) = setup(&[0xa2, 0x01, 0xd0, 0x02]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 3);

    // taken, crossing into $8101
    let mut prg = vec![0xa2, 0x01];
    prg.resize(0xfd, 0xea); // NOP sled up to $80FD
    prg.extend_from_slice(&[0xd0, 0x02]);
    let (mut bus, mut cpu) = setup(&prg);
    run_until(&mut cpu, &mut bus, 0x80fd);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.pc(), 0x8101);
}

#[test]
fn page_cross_penalty_on_reads_only() {
    // LDA $80FF,X with X=1 crosses: 5 cycles
    let (mut bus, mut cpu) = setup(&[0xa2, 0x01, 0xbd, 0xff, 0x80]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 5);

    // without crossing: 4 cycles
    let (mut bus, mut cpu) = setup(&[0xa2, 0x00, 0xbd, 0xff, 0x80]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 4);

    // STA $01FF,X always pays the fixed 5
    let (mut bus, mut cpu) = setup(&[0xa2, 0x01, 0x9d, 0xff, 0x01]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 5);

    // INC $01FF,X is a fixed 7
    let (mut bus, mut cpu) = setup(&[0xa2, 0x01, 0xfe, 0xff, 0x01]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 7);
}

#[test]
fn jmp_indirect_page_wrap_bug() {
    // JMP ($02FF) reads the high byte from $0200
    let (mut bus, mut cpu) = setup(&[0x6c, 0xff, 0x02]);
    bus.cpu_write(0x02ff, 0x34);
    bus.cpu_write(0x0300, 0x99); // would be used without the bug
    bus.cpu_write(0x0200, 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.pc(), 0x1234);
}

#[test]
fn nmi_taken_at_instruction_boundary() {
    // spin: JMP $8000 / NMI handler: RTI at $9000
    let mut prg = vec![0x4c, 0x00, 0x80];
    prg.resize(0x1001, 0xea);
    prg[0x1000] = 0x40;
    let (mut bus, mut cpu) = setup(&prg);

    step(&mut cpu, &mut bus);
    let sp0 = cpu.sp();
    cpu.nmi();

    assert_eq!(step(&mut cpu, &mut bus), 7);
    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), sp0.wrapping_sub(3));
    assert_ne!(cpu.status() & 0x04, 0); // I set

    let pushed = bus.cpu_read(0x0100 + sp0.wrapping_sub(2) as u16);
    assert_eq!(pushed & 0x10, 0x00); // B clear
    assert_eq!(pushed & 0x20, 0x20); // bit 5 set

    // RTI returns to the spin loop
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn irq_respects_interrupt_mask() {
    // reset leaves I set: the IRQ is dropped
    let (mut bus, mut cpu) = setup(&[0x4c, 0x00, 0x80]);
    cpu.irq();
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc(), 0x8000);

    // CLI ; JMP $8001
    let (mut bus, mut cpu) = setup(&[0x58, 0x4c, 0x01, 0x80]);
    step(&mut cpu, &mut bus);
    cpu.irq();
    assert_eq!(step(&mut cpu, &mut bus), 7);
    assert_eq!(cpu.pc(), 0xa000);
}

#[test]
fn unknown_opcodes_run_as_nops() {
    // jam opcode $02: one byte, two cycles
    let (mut bus, mut cpu) = setup(&[0x02, 0xea]);
    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn multi_byte_nops_have_documented_shapes() {
    // DOP zp ($04): 2 bytes, 3 cycles
    let (mut bus, mut cpu) = setup(&[0x04, 0x10]);
    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.pc(), 0x8002);

    // TOP abs ($0C): 3 bytes, 4 cycles
    let (mut bus, mut cpu) = setup(&[0x0c, 0x00, 0x02]);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.pc(), 0x8003);

    // TOP abs,X ($1C) pays the cross penalty
    let (mut bus, mut cpu) = setup(&[0xa2, 0x01, 0x1c, 0xff, 0x02]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 5);
}

#[test]
fn undocumented_lax_and_dcp() {
    // LAX $10
    let (mut bus, mut cpu) = setup(&[0xa7, 0x10]);
    bus.cpu_write(0x0010, 0x5a);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a(), 0x5a);
    assert_eq!(cpu.x(), 0x5a);

    // LDA #$10 ; DCP $20 with $20 = $11: decrements then compares equal
    let (mut bus, mut cpu) = setup(&[0xa9, 0x10, 0xc7, 0x20]);
    bus.cpu_write(0x0020, 0x11);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 5);
    assert_eq!(bus.cpu_read(0x0020), 0x10);
    assert_eq!(cpu.status() & 0x03, 0x03); // C and Z from the compare
}

#[test]
fn sbc_isb_agree() {
    // SEC ; LDA #$40 ; ISB $10 with $10 = $0F: INC to $10, then A - $10
    let (mut bus, mut cpu) = setup(&[0x38, 0xa9, 0x40, 0xe7, 0x10]);
    bus.cpu_write(0x0010, 0x0f);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(bus.cpu_read(0x0010), 0x10);
    assert_eq!(cpu.a(), 0x30);
}
