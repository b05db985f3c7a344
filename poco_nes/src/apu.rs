use bit_field::BitField;

mod dmc;
mod noise;
mod pulse;
mod resampler;
mod triangle;
mod units;

use dmc::Dmc;
use noise::Noise;
use pulse::Pulse;
pub use resampler::{Resampler, SampleOutput};
use triangle::Triangle;
use units::{FrameCounter, Step};

/// host-side sample rate, mono f32
pub const SAMPLE_RATE: u32 = 44_100;

trait Channel {
    /// current 4-bit level, 0 when gated
    fn output(&self) -> u8;

    fn tick_timer(&mut self);
    fn tick_quarter(&mut self);
    fn tick_half(&mut self);

    fn write_reg0(&mut self, data: u8);
    fn write_reg1(&mut self, data: u8);
    fn write_reg2(&mut self, data: u8);
    fn write_reg3(&mut self, data: u8);

    fn set_enable(&mut self, enable: bool);
    fn active(&self) -> bool;
}

/// Clocked at the CPU rate by the Bus. Pulse and noise timers run at half
/// rate, the triangle at full rate, and the frame sequencer distributes
/// quarter/half-frame ticks to envelopes, sweeps and length counters.
pub struct Apu {
    frame: FrameCounter,
    pulse1: Pulse,
    pulse2: Pulse,
    triangle: Triangle,
    noise: Noise,
    dmc: Dmc,

    cycles: u64,
    resampler: Resampler,
}

impl Default for Apu {
    fn default() -> Self {
        Self {
            frame: FrameCounter::new(),
            pulse1: Pulse::new(true),
            pulse2: Pulse::new(false),
            triangle: Triangle::new(),
            noise: Noise::new(),
            dmc: Dmc::new(),

            cycles: 0,
            resampler: Resampler::new(),
        }
    }
}

impl Apu {
    pub fn clock(&mut self) {
        self.triangle.tick_timer();

        if self.cycles % 2 == 0 {
            self.pulse1.tick_timer();
            self.pulse2.tick_timer();
            self.noise.tick_timer();

            let step = self.frame.tick();
            self.frame_tick(step);
        }

        let s = self.mix();
        self.resampler.add_sample(s);

        self.cycles += 1;
    }

    fn frame_tick(&mut self, step: Step) {
        if step.contains(Step::QUARTER) {
            self.pulse1.tick_quarter();
            self.pulse2.tick_quarter();
            self.triangle.tick_quarter();
            self.noise.tick_quarter();
            self.dmc.tick_quarter();
        }
        if step.contains(Step::HALF) {
            self.pulse1.tick_half();
            self.pulse2.tick_half();
            self.triangle.tick_half();
            self.noise.tick_half();
            self.dmc.tick_half();
        }
    }

    fn mix(&self) -> f32 {
        let pulse = (self.pulse1.output() + self.pulse2.output()) as usize;
        let pulse_out = PULSE_TABLE[pulse];

        let tnd_sum = self.triangle.output() as f32 / 8227.0
            + self.noise.output() as f32 / 12241.0
            + self.dmc.output() as f32 / 22638.0;
        let tnd_out = if tnd_sum > 0.0 {
            159.79 / (1.0 / tnd_sum + 100.0)
        } else {
            0.0
        };

        pulse_out + tnd_out
    }

    /// $4015: length-counter states plus the frame IRQ flag; reading clears
    /// the IRQ flag.
    pub fn read_status(&mut self) -> u8 {
        let mut data = 0u8;
        data.set_bit(0, self.pulse1.active());
        data.set_bit(1, self.pulse2.active());
        data.set_bit(2, self.triangle.active());
        data.set_bit(3, self.noise.active());
        data.set_bit(6, self.frame.take_irq());
        data
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x4000 => self.pulse1.write_reg0(data),
            0x4001 => self.pulse1.write_reg1(data),
            0x4002 => self.pulse1.write_reg2(data),
            0x4003 => self.pulse1.write_reg3(data),

            0x4004 => self.pulse2.write_reg0(data),
            0x4005 => self.pulse2.write_reg1(data),
            0x4006 => self.pulse2.write_reg2(data),
            0x4007 => self.pulse2.write_reg3(data),

            0x4008 => self.triangle.write_reg0(data),
            0x4009 => self.triangle.write_reg1(data),
            0x400a => self.triangle.write_reg2(data),
            0x400b => self.triangle.write_reg3(data),

            0x400c => self.noise.write_reg0(data),
            0x400d => self.noise.write_reg1(data),
            0x400e => self.noise.write_reg2(data),
            0x400f => self.noise.write_reg3(data),

            0x4010 => self.dmc.write_reg0(data),
            0x4011 => self.dmc.write_reg1(data),
            0x4012 => self.dmc.write_reg2(data),
            0x4013 => self.dmc.write_reg3(data),

            0x4015 => {
                self.pulse1.set_enable(data.get_bit(0));
                self.pulse2.set_enable(data.get_bit(1));
                self.triangle.set_enable(data.get_bit(2));
                self.noise.set_enable(data.get_bit(3));
                self.dmc.set_enable(data.get_bit(4));
            }
            0x4017 => {
                self.frame.load(data);
                if data.get_bit(7) {
                    self.frame_tick(Step::QUARTER | Step::HALF);
                }
            }
            _ => {}
        }
    }

    /// Frame-counter IRQ line, level-triggered: it stays asserted until a
    /// $4015 read acknowledges it or the inhibit bit is set.
    pub fn poll_irq(&self) -> bool {
        self.frame.irq()
    }

    pub fn reset(&mut self) {
        self.write(0x4015, 0x00);
        self.resampler.clear();
    }

    pub fn output(&self) -> SampleOutput {
        self.resampler.output()
    }
}

lazy_static::lazy_static! {
    static ref PULSE_TABLE: [f32; 31] = {
        let mut table = [0.0f32; 31];
        table.iter_mut().enumerate().skip(1).for_each(|(i, t)| {
            *t = 95.88 / (8128.0 / i as f32 + 100.0);
        });
        table
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse1_on(apu: &mut Apu, period: u8) {
        apu.write(0x4015, 0x01);
        apu.write(0x4000, 0b1011_1111); // duty 2, halt, constant volume 15
        apu.write(0x4002, period);
        apu.write(0x4003, 0x08); // length index 1, timer high 0
        // park the sequencer on a high duty step
        for _ in 0..6 {
            apu.pulse1.tick_timer();
        }
    }

    #[test]
    fn pulse_mutes_below_period_8() {
        let mut apu = Apu::default();
        pulse1_on(&mut apu, 7);
        assert_eq!(apu.mix(), 0.0);

        let mut apu = Apu::default();
        pulse1_on(&mut apu, 8);
        assert!(apu.mix() > 0.0);
    }

    #[test]
    fn disabling_a_channel_zeroes_its_length() {
        let mut apu = Apu::default();
        pulse1_on(&mut apu, 8);
        assert_eq!(apu.read_status() & 0x01, 0x01);

        apu.write(0x4015, 0x00);
        assert_eq!(apu.read_status() & 0x01, 0x00);
    }

    #[test]
    fn frame_irq_fires_and_clears_on_read() {
        let mut apu = Apu::default();
        apu.write(0x4017, 0x00); // 4-step, IRQ enabled

        // 14915 half-rate ticks
        for _ in 0..14915 * 2 {
            apu.clock();
        }
        assert_eq!(apu.read_status() & 0x40, 0x40);
        assert_eq!(apu.read_status() & 0x40, 0x00);
    }

    #[test]
    fn five_step_mode_raises_no_irq() {
        let mut apu = Apu::default();
        apu.write(0x4017, 0x80);

        for _ in 0..18641 * 2 {
            apu.clock();
        }
        assert_eq!(apu.read_status() & 0x40, 0x00);
    }

    #[test]
    fn triangle_needs_linear_and_length() {
        let mut apu = Apu::default();
        apu.write(0x4015, 0x04);
        apu.write(0x4008, 0x7f); // linear load 127, control off
        apu.write(0x400a, 0x80); // period above the ultrasonic guard
        apu.write(0x400b, 0x08); // load length, set linear reload
        assert_eq!(apu.mix(), 0.0); // linear counter not reloaded yet

        apu.frame_tick(Step::QUARTER);
        // sequence starts at step 0 which outputs 15
        assert!(apu.mix() > 0.0);
    }
}
