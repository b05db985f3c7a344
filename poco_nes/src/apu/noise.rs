use super::units::{Divider, Envelope, LengthCounter};
use bit_field::BitField;

/// NTSC noise timer periods
const PERIODS: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

#[derive(Debug)]
pub struct Noise {
    timer: Divider,
    length: LengthCounter,
    envelope: Envelope,

    lfsr: u16,
    mode: bool,
}

impl Noise {
    pub fn new() -> Self {
        Self {
            timer: Divider::new(),
            length: LengthCounter::new(),
            envelope: Envelope::new(),

            lfsr: 1,
            mode: false,
        }
    }
}

impl super::Channel for Noise {
    fn output(&self) -> u8 {
        if !self.length.active() || self.lfsr.get_bit(0) {
            0
        } else {
            self.envelope.volume()
        }
    }

    fn tick_timer(&mut self) {
        if self.timer.tick() {
            let tap = if self.mode { 6 } else { 1 };
            let feedback = self.lfsr.get_bit(0) ^ self.lfsr.get_bit(tap);
            self.lfsr >>= 1;
            self.lfsr.set_bit(14, feedback);
        }
    }

    fn tick_quarter(&mut self) {
        self.envelope.tick();
    }

    fn tick_half(&mut self) {
        self.length.tick();
    }

    fn write_reg0(&mut self, data: u8) {
        self.length.set_halt(data.get_bit(5));
        self.envelope.load(data);
    }

    fn write_reg1(&mut self, _: u8) {}

    fn write_reg2(&mut self, data: u8) {
        self.mode = data.get_bit(7);
        self.timer.set_period(PERIODS[data.get_bits(0..4) as usize]);
    }

    fn write_reg3(&mut self, data: u8) {
        self.length.load(data);
        self.envelope.restart();
    }

    fn set_enable(&mut self, enable: bool) {
        self.length.set_enable(enable);
    }

    fn active(&self) -> bool {
        self.length.active()
    }
}

#[cfg(test)]
mod tests {
    use super::super::Channel;
    use super::*;

    #[test]
    fn lfsr_never_reaches_zero() {
        for mode in [0x00u8, 0x80] {
            let mut noise = Noise::new();
            noise.write_reg2(mode); // period 4
            for _ in 0..100_000 {
                noise.tick_timer();
                assert_ne!(noise.lfsr, 0);
                assert!(noise.lfsr <= 0x7fff);
            }
        }
    }
}
