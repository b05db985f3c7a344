use crate::bus::Bus;
use addressing::AddrMode;
use status::Status;

mod addressing;
mod op_code;
mod status;

const NMI_VECTOR: u16 = 0xfffa;
const RESET_VECTOR: u16 = 0xfffc;
const IRQ_VECTOR: u16 = 0xfffe;

/// NMOS 6502 as wired into the NES: no decimal arithmetic, and all bus
/// traffic for an instruction issued at the fetch boundary. `clock()` burns
/// down a per-instruction cycle countdown so the Bus can step it at the CPU
/// rate.
pub struct Cpu {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    p: Status,

    cycles: u8,
    nmi_pending: bool,
    irq_pending: bool,

    op: u8,
    op_mode: AddrMode,
    op_address: u16,
    cross_page: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xfd,
            pc: 0,
            p: 0x24u8.into(),

            cycles: 0,
            nmi_pending: false,
            irq_pending: false,

            op: 0xea,
            op_mode: AddrMode::IMP,
            op_address: 0,
            cross_page: false,
        }
    }

    pub fn reset(&mut self, bus: &mut Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xfd;
        self.p = 0x24u8.into();
        self.pc = self.read_word(RESET_VECTOR, bus);
        self.nmi_pending = false;
        self.irq_pending = false;
        self.cycles = 8;
    }

    /// Advances one CPU cycle. Pending interrupts are taken at the next
    /// instruction boundary.
    pub fn clock(&mut self, bus: &mut Bus) {
        if self.cycles > 0 {
            self.cycles -= 1;
            return;
        }

        // a latch masked in the interim (an NMI entry sets I) is stale;
        // the Bus re-polls the IRQ line every cycle
        if self.irq_pending && self.p.i {
            self.irq_pending = false;
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(NMI_VECTOR, bus);
        } else if self.irq_pending {
            self.irq_pending = false;
            self.interrupt(IRQ_VECTOR, bus);
        } else {
            self.execute(bus);
        }

        // the boundary tick itself is one of the instruction's cycles
        self.cycles -= 1;
    }

    /// Edge-triggered; latched until the current instruction retires.
    pub fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    pub fn irq(&mut self) {
        if !self.p.i {
            self.irq_pending = true;
        }
    }

    fn execute(&mut self, bus: &mut Bus) {
        let pc = self.pc;
        self.op = self.fetch_byte(bus);
        self.addressing(self.op, bus);
        self.cycles = op_code::OP_CYCLES[self.op as usize];

        log::trace!(
            "{:04X} {} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            pc,
            op_code::OP_NAMES[self.op as usize],
            self.a,
            self.x,
            self.y,
            self.p.to_u8(),
            self.sp,
        );

        let func = op_code::OP_FUNCS[self.op as usize];
        func(self, bus);
    }

    fn interrupt(&mut self, vector: u16, bus: &mut Bus) {
        self.push_word(self.pc, bus);
        self.push_byte(self.p.to_u8(), bus);
        self.p.i = true;
        self.pc = self.read_word(vector, bus);
        self.cycles = 7;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, addr: u16) {
        self.pc = addr;
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn status(&self) -> u8 {
        self.p.to_u8()
    }

    pub fn cycles_remaining(&self) -> u8 {
        self.cycles
    }
}

impl Cpu {
    fn fetch_byte(&mut self, bus: &mut Bus) -> u8 {
        let b = bus.cpu_read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        b
    }

    fn fetch_word(&mut self, bus: &mut Bus) -> u16 {
        let d = self.read_word(self.pc, bus);
        self.pc = self.pc.wrapping_add(2);
        d
    }

    fn read_word(&mut self, addr: u16, bus: &mut Bus) -> u16 {
        let lb = bus.cpu_read(addr) as u16;
        let hb = bus.cpu_read(addr.wrapping_add(1)) as u16;
        (hb << 8) | lb
    }

    fn push_byte(&mut self, b: u8, bus: &mut Bus) {
        bus.cpu_write(0x0100 + self.sp as u16, b);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop_byte(&mut self, bus: &mut Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.cpu_read(0x0100 + self.sp as u16)
    }

    fn push_word(&mut self, b: u16, bus: &mut Bus) {
        self.push_byte((b >> 8) as u8, bus);
        self.push_byte(b as u8, bus);
    }

    fn pop_word(&mut self, bus: &mut Bus) -> u16 {
        let lb = self.pop_byte(bus) as u16;
        let hb = self.pop_byte(bus) as u16;
        (hb << 8) | lb
    }
}
