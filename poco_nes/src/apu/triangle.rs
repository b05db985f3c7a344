use super::units::{Divider, LengthCounter};
use bit_field::BitField;

const SEQ: [u8; 32] = [
    0x0f, 0x0e, 0x0d, 0x0c, 0x0b, 0x0a, 0x09, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x00,
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];

#[derive(Debug)]
pub struct Triangle {
    step: usize,
    timer: Divider,
    length: LengthCounter,

    linear_load: u8,
    linear: u8,
    linear_reload: bool,
    // shared with the length-halt bit
    control: bool,
}

impl Triangle {
    pub fn new() -> Self {
        Self {
            step: 0,
            timer: Divider::new(),
            length: LengthCounter::new(),

            linear_load: 0,
            linear: 0,
            linear_reload: false,
            control: false,
        }
    }
}

impl super::Channel for Triangle {
    fn output(&self) -> u8 {
        if !self.length.active() || self.linear == 0 {
            0
        } else if self.timer.period() < 2 {
            // ultrasonic, hold the midpoint to avoid pops
            7
        } else {
            SEQ[self.step]
        }
    }

    fn tick_timer(&mut self) {
        if self.timer.tick() && self.length.active() && self.linear > 0 {
            self.step = (self.step + 1) % 32;
        }
    }

    fn tick_quarter(&mut self) {
        if self.linear_reload {
            self.linear = self.linear_load;
        } else if self.linear > 0 {
            self.linear -= 1;
        }
        if !self.control {
            self.linear_reload = false;
        }
    }

    fn tick_half(&mut self) {
        self.length.tick();
    }

    fn write_reg0(&mut self, data: u8) {
        self.control = data.get_bit(7);
        self.length.set_halt(data.get_bit(7));
        self.linear_load = data.get_bits(0..7);
    }

    fn write_reg1(&mut self, _: u8) {}

    fn write_reg2(&mut self, data: u8) {
        self.timer.set_period_low(data);
    }

    fn write_reg3(&mut self, data: u8) {
        self.timer.set_period_high(data);
        self.length.load(data);
        self.linear_reload = true;
    }

    fn set_enable(&mut self, enable: bool) {
        self.length.set_enable(enable);
    }

    fn active(&self) -> bool {
        self.length.active()
    }
}
