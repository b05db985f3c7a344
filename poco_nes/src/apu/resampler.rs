use std::sync::{Arc, Mutex};

const BUFFER_SIZE: usize = 8192;
const SAMPLES_PER_CPU_TICK: f64 = super::SAMPLE_RATE as f64 / crate::CPU_FREQUENCY;
const LPF_ALPHA: f32 = 0.65;
const MASTER_VOLUME: f32 = 0.5;

struct Ring {
    buf: Box<[f32; BUFFER_SIZE]>,
    read: usize,
    write: usize,
    last: f32,
}

impl Ring {
    fn push(&mut self, s: f32) {
        self.buf[self.write] = s;
        self.write = (self.write + 1) % BUFFER_SIZE;
        // overrun drops the oldest sample so latency stays bounded
        if self.write == self.read {
            self.read = (self.read + 1) % BUFFER_SIZE;
        }
    }
}

/// Boils the CPU-rate mix stream down to 44.1 kHz: every CPU tick
/// accumulates into an average, a fractional accumulator decides when a
/// host sample is due, and a single-pole low-pass knocks the aliasing off
/// before the sample enters the shared ring.
pub struct Resampler {
    sum: f64,
    count: u32,
    fraction: f64,
    filtered: f32,

    ring: Arc<Mutex<Ring>>,
}

impl Resampler {
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            count: 0,
            fraction: 0.0,
            filtered: 0.0,

            ring: Arc::new(Mutex::new(Ring {
                buf: Box::new([0.0; BUFFER_SIZE]),
                read: 0,
                write: 0,
                last: 0.0,
            })),
        }
    }

    pub(crate) fn add_sample(&mut self, s: f32) {
        self.sum += s as f64;
        self.count += 1;

        self.fraction += SAMPLES_PER_CPU_TICK;
        if self.fraction >= 1.0 {
            self.fraction -= 1.0;

            let avg = (self.sum / self.count as f64) as f32;
            self.sum = 0.0;
            self.count = 0;

            let y = LPF_ALPHA * avg + (1.0 - LPF_ALPHA) * self.filtered;
            self.filtered = y;

            self.ring.lock().unwrap().push(y);
        }
    }

    pub fn clear(&mut self) {
        self.sum = 0.0;
        self.count = 0;
        self.fraction = 0.0;
        self.filtered = 0.0;

        let mut ring = self.ring.lock().unwrap();
        ring.read = 0;
        ring.write = 0;
        ring.last = 0.0;
    }

    pub fn output(&self) -> SampleOutput {
        SampleOutput {
            ring: self.ring.clone(),
        }
    }
}

/// Consumer handle for the host audio callback; the only piece of the core
/// that crosses a thread boundary.
#[derive(Clone)]
pub struct SampleOutput {
    ring: Arc<Mutex<Ring>>,
}

impl SampleOutput {
    /// Drains samples at master volume; an underrun repeats the last
    /// delivered sample instead of clicking down to silence.
    pub fn fill(&self, out: &mut [f32]) {
        let mut ring = self.ring.lock().unwrap();
        for o in out.iter_mut() {
            if ring.read != ring.write {
                ring.last = ring.buf[ring.read] * MASTER_VOLUME;
                ring.read = (ring.read + 1) % BUFFER_SIZE;
            }
            *o = ring.last;
        }
    }
}
