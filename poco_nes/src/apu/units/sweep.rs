use super::Divider;
use bit_field::BitField;

/// Pulse sweep unit. Pulse 1 negates in ones-complement, so its downward
/// target lands one step lower than pulse 2's.
#[derive(Debug)]
pub struct Sweep {
    enabled: bool,
    negate: bool,
    shift: u8,
    period: u8,
    divider: u8,
    reload: bool,
    ones_complement: bool,
}

impl Sweep {
    pub fn new(ones_complement: bool) -> Self {
        Self {
            enabled: false,
            negate: false,
            shift: 0,
            period: 0,
            divider: 0,
            reload: false,
            ones_complement,
        }
    }

    pub fn target(&self, period: u16) -> u16 {
        let delta = period >> self.shift;
        if self.negate {
            period.saturating_sub(delta + self.ones_complement as u16)
        } else {
            period + delta
        }
    }

    /// silences the channel regardless of the divider state
    pub fn muting(&self, period: u16) -> bool {
        period < 8 || self.target(period) > 0x7ff
    }

    pub fn tick(&mut self, timer: &mut Divider) {
        if self.divider == 0 && self.enabled && self.shift > 0 && !self.muting(timer.period()) {
            let target = self.target(timer.period());
            timer.set_period(target);
        }

        if self.divider == 0 || self.reload {
            self.divider = self.period;
            self.reload = false;
        } else {
            self.divider -= 1;
        }
    }

    pub fn load(&mut self, data: u8) {
        self.enabled = data.get_bit(7);
        self.period = data.get_bits(4..7);
        self.negate = data.get_bit(3);
        self.shift = data.get_bits(0..3);
        self.reload = true;
    }
}
