mod common;

use common::setup;
use poco_nes::Buttons;

const SPIN: [u8; 3] = [0x4c, 0x00, 0x80]; // JMP $8000

#[test]
fn frame_irq_vectors_the_cpu_when_unmasked() {
    // CLI ; JMP $8001 -- handler at $A000 acks $4015, stores $42, spins
    let mut prg = vec![0x58, 0x4c, 0x01, 0x80];
    prg.resize(0x200a, 0xea);
    prg[0x2000..0x200a]
        .copy_from_slice(&[0xad, 0x15, 0x40, 0xa9, 0x42, 0x85, 0x00, 0x4c, 0x07, 0xa0]);
    let (mut bus, mut cpu) = setup(&prg);

    bus.cpu_write(0x4017, 0x00); // 4-step mode, IRQ enabled

    // the IRQ lands after 14915 half-rate APU ticks (~89490 master ticks)
    for _ in 0..95_000 {
        bus.clock(&mut cpu);
    }

    assert_eq!(bus.cpu_read(0x0000), 0x42);
    assert_eq!(cpu.pc(), 0xa007);
    assert_ne!(cpu.status() & 0x04, 0); // masked while in the handler
}

#[test]
fn frame_irq_stays_masked_while_i_is_set() {
    // reset leaves I set and the spin loop never clears it
    let (mut bus, mut cpu) = setup(&SPIN);
    bus.cpu_write(0x4017, 0x00);

    for _ in 0..95_000 {
        bus.clock(&mut cpu);
    }

    assert_eq!(cpu.pc(), 0x8000);
    // the line is still asserted, and reading status acknowledges it
    assert_eq!(bus.cpu_read(0x4015) & 0x40, 0x40);
    assert_eq!(bus.cpu_read(0x4015) & 0x40, 0x00);
}

#[test]
fn work_ram_mirrors_every_2k() {
    let (mut bus, _) = setup(&SPIN);

    bus.cpu_write(0x0000, 0xaa);
    assert_eq!(bus.cpu_read(0x0800), 0xaa);
    assert_eq!(bus.cpu_read(0x1000), 0xaa);
    assert_eq!(bus.cpu_read(0x1800), 0xaa);

    bus.cpu_write(0x1801, 0x55);
    assert_eq!(bus.cpu_read(0x0001), 0x55);
}

#[test]
fn unmapped_io_reads_zero() {
    let (mut bus, _) = setup(&SPIN);
    assert_eq!(bus.cpu_read(0x4014), 0x00);
    assert_eq!(bus.cpu_read(0x4000), 0x00);
    assert_eq!(bus.cpu_read(0x4018), 0x00);
}

#[test]
fn controller_latches_and_shifts_in_button_order() {
    let (mut bus, _) = setup(&SPIN);

    // A | Select | Down | Right = 0xa5
    bus.set_input0(Buttons::A | Buttons::SELECT | Buttons::DOWN | Buttons::RIGHT);
    bus.cpu_write(0x4016, 1);
    bus.cpu_write(0x4016, 0);

    let bits: Vec<u8> = (0..8).map(|_| bus.cpu_read(0x4016) & 0x01).collect();
    assert_eq!(bits, [1, 0, 1, 0, 0, 1, 0, 1]);
}

#[test]
fn strobe_held_high_keeps_reporting_live_a() {
    let (mut bus, _) = setup(&SPIN);

    bus.set_input0(Buttons::A);
    bus.cpu_write(0x4016, 1);
    for _ in 0..4 {
        assert_eq!(bus.cpu_read(0x4016) & 0x01, 1);
    }
    bus.set_input0(Buttons::empty());
    assert_eq!(bus.cpu_read(0x4016) & 0x01, 0);

    // open bus bits
    assert_eq!(bus.cpu_read(0x4016) & 0x40, 0x40);
}

#[test]
fn oam_dma_copies_a_page_and_stalls_the_cpu() {
    let (mut bus, mut cpu) = setup(&SPIN);

    for i in 0..256u16 {
        bus.cpu_write(0x0200 + i, i as u8);
    }

    // master tick count is even here, so alignment costs two waits
    bus.cpu_write(0x4014, 0x02);
    assert!(bus.dma_active());

    let mut cpu_ticks = 0u32;
    while bus.dma_active() {
        if bus.ticks() % 3 == 0 {
            cpu_ticks += 1;
        }
        bus.clock(&mut cpu);
    }
    assert_eq!(cpu_ticks, 514);

    for i in 0..256u16 {
        bus.cpu_write(0x2003, i as u8);
        assert_eq!(bus.cpu_read(0x2004), i as u8);
    }
}

#[test]
fn oam_dma_alignment_costs_one_less_from_an_odd_tick() {
    let (mut bus, mut cpu) = setup(&SPIN);
    bus.clock(&mut cpu); // ticks now odd; next CPU tick lands on 3

    bus.cpu_write(0x4014, 0x00);
    let mut cpu_ticks = 0u32;
    while bus.dma_active() {
        if bus.ticks() % 3 == 0 {
            cpu_ticks += 1;
        }
        bus.clock(&mut cpu);
    }
    assert_eq!(cpu_ticks, 513);
}

#[test]
fn master_tick_counter_is_monotonic() {
    let (mut bus, mut cpu) = setup(&SPIN);

    let mut last = bus.ticks();
    for _ in 0..1000 {
        bus.clock(&mut cpu);
        assert_eq!(bus.ticks(), last + 1);
        last = bus.ticks();
    }
}

#[test]
fn apu_status_reads_through_the_bus() {
    let (mut bus, _) = setup(&SPIN);

    bus.cpu_write(0x4015, 0x01);
    bus.cpu_write(0x4003, 0x08); // load pulse 1 length
    assert_eq!(bus.cpu_read(0x4015) & 0x01, 0x01);

    bus.cpu_write(0x4015, 0x00);
    assert_eq!(bus.cpu_read(0x4015) & 0x01, 0x00);
}
