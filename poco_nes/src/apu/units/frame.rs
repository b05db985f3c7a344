use bit_field::BitField;

// mode 0:    mode 1:       function
// ---------  -----------  -----------------------------
//  - - - f    - - - - -    IRQ (if bit 6 is clear)
//  - l - l    - l - - l    length counters and sweep
//  e e e e    e e e - e    envelopes and linear counter

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Step4,
    Step5,
}

bitflags::bitflags! {
    pub struct Step: u8 {
        const QUARTER = 0b01;
        const HALF    = 0b10;
    }
}

/// ~240 Hz sequencer, ticked at half the CPU rate.
#[derive(Debug)]
pub struct FrameCounter {
    mode: Mode,
    counter: u32,
    irq_inhibit: bool,
    irq_level: bool,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self {
            mode: Mode::Step4,
            counter: 0,
            irq_inhibit: false,
            irq_level: false,
        }
    }

    pub fn tick(&mut self) -> Step {
        self.counter += 1;

        let mut step = Step::empty();
        match self.mode {
            Mode::Step4 => match self.counter {
                3729 | 11186 => step = Step::QUARTER,
                7457 => step = Step::QUARTER | Step::HALF,
                14915 => {
                    step = Step::QUARTER | Step::HALF;
                    if !self.irq_inhibit {
                        self.irq_level = true;
                    }
                    self.counter = 0;
                }
                _ => {}
            },
            Mode::Step5 => match self.counter {
                3729 | 11186 => step = Step::QUARTER,
                7457 => step = Step::QUARTER | Step::HALF,
                18641 => {
                    step = Step::QUARTER | Step::HALF;
                    self.counter = 0;
                }
                _ => {}
            },
        }

        step
    }

    pub fn load(&mut self, data: u8) {
        self.mode = if data.get_bit(7) {
            Mode::Step5
        } else {
            Mode::Step4
        };
        self.irq_inhibit = data.get_bit(6);
        if self.irq_inhibit {
            self.irq_level = false;
        }
        self.counter = 0;
    }

    /// current IRQ line level; held until a $4015 read or inhibit
    pub fn irq(&self) -> bool {
        self.irq_level
    }

    pub fn take_irq(&mut self) -> bool {
        std::mem::take(&mut self.irq_level)
    }
}
