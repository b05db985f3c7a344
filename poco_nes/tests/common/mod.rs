use poco_nes::{Bus, Cartridge, Cpu};

/// Wraps a 16KB PRG bank (mirrored at $8000/$C000) in an iNES image with
/// CHR-RAM. Vectors: reset $8000, NMI $9000, IRQ $A000.
pub fn build_rom(prg: &[u8]) -> Vec<u8> {
    assert!(prg.len() <= 0x4000);

    let mut bank = vec![0u8; 0x4000];
    bank[..prg.len()].copy_from_slice(prg);
    bank[0x3ffa] = 0x00;
    bank[0x3ffb] = 0x90;
    bank[0x3ffc] = 0x00;
    bank[0x3ffd] = 0x80;
    bank[0x3ffe] = 0x00;
    bank[0x3fff] = 0xa0;

    let mut data = vec![b'N', b'E', b'S', 0x1a, 1, 0, 0, 0];
    data.resize(16, 0);
    data.extend_from_slice(&bank);
    data
}

pub fn setup(prg: &[u8]) -> (Bus, Cpu) {
    let cart = Cartridge::load(&build_rom(prg)).unwrap();
    let mut bus = Bus::new(cart);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    (bus, cpu)
}

/// Finishes any countdown in flight, then runs exactly one instruction (or
/// pending interrupt) and returns its cycle cost.
#[allow(dead_code)]
pub fn step(cpu: &mut Cpu, bus: &mut Bus) -> u32 {
    while cpu.cycles_remaining() > 0 {
        cpu.clock(bus);
    }
    cpu.clock(bus);
    1 + cpu.cycles_remaining() as u32
}

/// Steps until PC reaches `addr`, with a runaway guard.
#[allow(dead_code)]
pub fn run_until(cpu: &mut Cpu, bus: &mut Bus, addr: u16) {
    for _ in 0..100_000 {
        if cpu.pc() == addr && cpu.cycles_remaining() == 0 {
            return;
        }
        cpu.clock(bus);
    }
    panic!("pc never reached {:04x}", addr);
}
