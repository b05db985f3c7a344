use super::units::{Divider, Envelope, LengthCounter, Sweep};
use bit_field::BitField;

const DUTY: [[u8; 8]; 4] = [
    [0, 1, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 0, 0, 0],
    [1, 0, 0, 1, 1, 1, 1, 1],
];

#[derive(Debug)]
pub struct Pulse {
    duty: usize,
    step: usize,

    timer: Divider,
    length: LengthCounter,
    envelope: Envelope,
    sweep: Sweep,
}

impl Pulse {
    pub fn new(ones_complement: bool) -> Self {
        Self {
            duty: 0,
            step: 0,

            timer: Divider::new(),
            length: LengthCounter::new(),
            envelope: Envelope::new(),
            sweep: Sweep::new(ones_complement),
        }
    }
}

impl super::Channel for Pulse {
    fn output(&self) -> u8 {
        if !self.length.active()
            || self.sweep.muting(self.timer.period())
            || DUTY[self.duty][self.step] == 0
        {
            0
        } else {
            self.envelope.volume()
        }
    }

    fn tick_timer(&mut self) {
        if self.timer.tick() {
            self.step = (self.step + 1) % 8;
        }
    }

    fn tick_quarter(&mut self) {
        self.envelope.tick();
    }

    fn tick_half(&mut self) {
        self.length.tick();
        self.sweep.tick(&mut self.timer);
    }

    fn write_reg0(&mut self, data: u8) {
        self.duty = data.get_bits(6..8) as usize;
        self.length.set_halt(data.get_bit(5));
        self.envelope.load(data);
    }

    fn write_reg1(&mut self, data: u8) {
        self.sweep.load(data);
    }

    fn write_reg2(&mut self, data: u8) {
        self.timer.set_period_low(data);
    }

    fn write_reg3(&mut self, data: u8) {
        self.timer.set_period_high(data);
        self.length.load(data);
        self.envelope.restart();
        self.step = 0;
    }

    fn set_enable(&mut self, enable: bool) {
        self.length.set_enable(enable);
    }

    fn active(&self) -> bool {
        self.length.active()
    }
}
