/// OAM DMA engine. After the $4014 write it waits for an odd CPU tick to
/// align, then alternates read/write for 256 byte pairs, holding the CPU
/// for 513 cycles (514 when started on an odd cycle).
#[derive(Debug, Default)]
pub struct Dma {
    active: bool,
    sync: bool,
    page: u8,
    addr: u8,
    data: u8,
}

/// what the bus should do on this CPU tick
pub enum DmaTick {
    /// alignment cycle, nothing on the bus
    Wait,
    /// fetch from this CPU address
    Read(u16),
    /// store to OAM at this offset
    Write(u8, u8),
}

impl Dma {
    pub fn start(&mut self, page: u8) {
        self.page = page;
        self.addr = 0;
        self.active = true;
        self.sync = true;
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn reset(&mut self) {
        self.active = false;
    }

    pub fn tick(&mut self, odd_cycle: bool) -> DmaTick {
        if self.sync {
            if odd_cycle {
                self.sync = false;
            }
            DmaTick::Wait
        } else if !odd_cycle {
            DmaTick::Read(((self.page as u16) << 8) | self.addr as u16)
        } else {
            let t = DmaTick::Write(self.addr, self.data);
            self.addr = self.addr.wrapping_add(1);
            if self.addr == 0 {
                self.active = false;
            }
            t
        }
    }

    pub fn store(&mut self, data: u8) {
        self.data = data;
    }
}
