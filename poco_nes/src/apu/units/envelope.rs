use bit_field::BitField;

/// Decay envelope; the divider reloads from the volume field, so one decay
/// step takes volume+1 quarter-frames.
#[derive(Debug, Default)]
pub struct Envelope {
    start: bool,
    looping: bool,
    constant: bool,
    volume: u8,
    decay: u8,
    divider: u8,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        if self.start {
            self.start = false;
            self.decay = 15;
            self.divider = self.volume;
        } else if self.divider == 0 {
            self.divider = self.volume;
            if self.decay > 0 {
                self.decay -= 1;
            } else if self.looping {
                self.decay = 15;
            }
        } else {
            self.divider -= 1;
        }
    }

    pub fn volume(&self) -> u8 {
        if self.constant {
            self.volume
        } else {
            self.decay
        }
    }

    pub fn load(&mut self, data: u8) {
        self.looping = data.get_bit(5);
        self.constant = data.get_bit(4);
        self.volume = data.get_bits(0..4);
    }

    pub fn restart(&mut self) {
        self.start = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decays_from_15() {
        let mut e = Envelope::new();
        e.load(0x00); // decay mode, volume/period 0
        e.restart();
        e.tick();
        assert_eq!(e.volume(), 15);
        e.tick();
        assert_eq!(e.volume(), 14);
        for _ in 0..20 {
            e.tick();
        }
        assert_eq!(e.volume(), 0); // stays silent without loop
    }

    #[test]
    fn loop_wraps_to_15() {
        let mut e = Envelope::new();
        e.load(0x20);
        e.restart();
        for _ in 0..17 {
            e.tick();
        }
        assert_eq!(e.volume(), 15);
    }
}
