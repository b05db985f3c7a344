#![allow(clippy::identity_op)]

pub mod apu;
pub mod bus;
pub mod cart;
pub mod cpu;
pub mod ppu;

pub use apu::{Apu, SampleOutput};
pub use bus::{Bus, Buttons};
pub use cart::{CartError, Cartridge, Mirroring};
pub use cpu::Cpu;
pub use ppu::Ppu;

/// NES NTSC master clock
pub const MASTER_CLOCK: f64 = 2147_7272.0;

/// cpu frequency (NTSC), master / 12
pub const CPU_FREQUENCY: f64 = 1_789_773.0;

/// ppu dot rate, 3x the cpu clock
pub const PPU_FREQUENCY: f64 = CPU_FREQUENCY * 3.0;
