/// DMC stub: $4010-$4013 writes are accepted and the $4011 level is
/// latched, but the channel contributes silence and fetches no samples.
#[derive(Debug, Default)]
pub struct Dmc {
    #[allow(dead_code)]
    enabled: bool,
    #[allow(dead_code)]
    level: u8,
}

impl Dmc {
    pub fn new() -> Self {
        Self::default()
    }
}

impl super::Channel for Dmc {
    fn output(&self) -> u8 {
        0
    }

    fn tick_timer(&mut self) {}
    fn tick_quarter(&mut self) {}
    fn tick_half(&mut self) {}

    fn write_reg0(&mut self, _: u8) {}

    fn write_reg1(&mut self, data: u8) {
        self.level = data & 0x7f;
    }

    fn write_reg2(&mut self, _: u8) {}
    fn write_reg3(&mut self, _: u8) {}

    fn set_enable(&mut self, enable: bool) {
        self.enabled = enable;
    }

    fn active(&self) -> bool {
        false
    }
}
