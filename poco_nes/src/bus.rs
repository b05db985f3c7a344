use self::dma::{Dma, DmaTick};
use self::joypad::Joypad;
use crate::{Apu, Cartridge, Cpu, Ppu, SampleOutput};

pub use joypad::Buttons;

mod dma;
mod joypad;

const RAM_SIZE: usize = 0x0800;

/// Owns every component except the CPU and routes all I/O between them.
/// One `clock()` call is one master (PPU dot) tick; the CPU and APU run on
/// every third.
pub struct Bus {
    ram: Box<[u8; RAM_SIZE]>,

    ppu: Ppu,
    apu: Apu,
    cart: Cartridge,
    joypad0: Joypad,
    joypad1: Joypad,
    dma: Dma,

    ticks: u64,
}

impl Bus {
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: Box::new([0u8; RAM_SIZE]),

            ppu: Ppu::new(cart.mirroring()),
            apu: Apu::default(),
            cart,
            joypad0: Joypad::default(),
            joypad1: Joypad::default(),
            dma: Dma::default(),

            ticks: 0,
        }
    }

    /// Advances one master tick: PPU always, CPU (or the DMA engine in its
    /// place) and APU on CPU-rate ticks, then NMI delivery.
    pub fn clock(&mut self, cpu: &mut Cpu) {
        {
            let Self { ppu, cart, .. } = self;
            ppu.clock(cart);
        }

        if self.ticks % 3 == 0 {
            if self.dma.active() {
                match self.dma.tick(self.ticks % 2 == 1) {
                    DmaTick::Wait => {}
                    DmaTick::Read(addr) => {
                        let data = self.cpu_read(addr);
                        self.dma.store(data);
                    }
                    DmaTick::Write(addr, data) => self.ppu.write_oam(addr, data),
                }
            } else {
                cpu.clock(self);
            }

            self.apu.clock();
            if self.apu.poll_irq() {
                cpu.irq();
            }
        }

        if self.ppu.consume_nmi() {
            cpu.nmi();
        }

        self.ticks += 1;
    }

    pub fn cpu_read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1fff => self.ram[addr as usize & 0x07ff],
            0x2000..=0x3fff => {
                let Self { ppu, cart, .. } = self;
                ppu.cpu_read(cart, addr)
            }
            0x4015 => self.apu.read_status(),
            0x4016 => self.joypad0.read(),
            0x4017 => self.joypad1.read(),
            0x4000..=0x401f => 0x00,
            0x4020..=0xffff => self.cart.read(addr),
        }
    }

    pub fn cpu_write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1fff => self.ram[addr as usize & 0x07ff] = data,
            0x2000..=0x3fff => {
                let Self { ppu, cart, .. } = self;
                ppu.cpu_write(cart, addr, data);
            }
            0x4014 => self.dma.start(data),
            0x4016 => {
                self.joypad0.write(data);
                self.joypad1.write(data);
            }
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write(addr, data),
            0x4018..=0x401f => {}
            0x4020..=0xffff => self.cart.write(addr, data),
        }
    }

    pub fn reset(&mut self, cpu: &mut Cpu) {
        self.ppu.reset();
        self.apu.reset();
        self.dma.reset();
        cpu.reset(self);
    }

    pub fn set_input0(&mut self, buttons: Buttons) {
        self.joypad0.set_buttons(buttons);
    }

    pub fn set_input1(&mut self, buttons: Buttons) {
        self.joypad1.set_buttons(buttons);
    }

    pub fn audio_output(&self) -> SampleOutput {
        self.apu.output()
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn cart(&self) -> &Cartridge {
        &self.cart
    }

    pub fn dma_active(&self) -> bool {
        self.dma.active()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
