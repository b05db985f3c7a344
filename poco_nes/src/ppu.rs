use self::palettes::PALETTES;
use self::regs::*;
use crate::cart::Cartridge;

mod palettes;
mod regs;

pub const DISPLAY_WIDTH: usize = 256;
pub const DISPLAY_HEIGHT: usize = 240;

const VRAM_SIZE: usize = 0x800;
const PALETTE_SIZE: usize = 0x20;
const OAM_SIZE: usize = 0x100;

#[derive(Debug, Default, Clone, Copy)]
struct SpriteLine {
    x: u8,
    attr: u8,
    pattern_lo: u8,
    pattern_hi: u8,
}

/// Dot-clocked NTSC PPU: 341 dots per scanline over scanlines -1 (pre-render)
/// to 260. One `clock()` call is one dot.
pub struct Ppu {
    vram: Box<[u8; VRAM_SIZE]>,
    palette: [u8; PALETTE_SIZE],
    oam: Box<[u8; OAM_SIZE]>,

    frame: Box<[u32; DISPLAY_WIDTH * DISPLAY_HEIGHT]>,
    frame_ready: bool,

    ctrl: PpuCtrl,
    mask: PpuMask,
    status: PpuStatus,
    oam_addr: u8,
    data_buf: u8,

    v: VramAddr,
    t: VramAddr,
    fine_x: u16,
    w: bool,

    line: i16,
    dot: u16,
    odd_frame: bool,
    nmi_raised: bool,

    nt_byte: u8,
    at_latch: u8,
    bg_lo: u8,
    bg_hi: u8,
    bg_shift: PatternShift,
    at_shift: AttrShift,

    sprites: [SpriteLine; 8],
    sprite_count: usize,
    sprite0_on_line: bool,

    nm_base: [u16; 4],
}

impl Ppu {
    pub fn new(mirroring: crate::cart::Mirroring) -> Self {
        Self {
            vram: Box::new([0u8; VRAM_SIZE]),
            palette: [0u8; PALETTE_SIZE],
            oam: Box::new([0u8; OAM_SIZE]),

            frame: Box::new([0xff00_0000u32; DISPLAY_WIDTH * DISPLAY_HEIGHT]),
            frame_ready: false,

            ctrl: PpuCtrl::default(),
            mask: PpuMask::default(),
            status: PpuStatus::default(),
            oam_addr: 0,
            data_buf: 0,

            v: VramAddr::default(),
            t: VramAddr::default(),
            fine_x: 0,
            w: false,

            line: -1,
            dot: 0,
            odd_frame: false,
            nmi_raised: false,

            nt_byte: 0,
            at_latch: 0,
            bg_lo: 0,
            bg_hi: 0,
            bg_shift: PatternShift::default(),
            at_shift: AttrShift::default(),

            sprites: [SpriteLine::default(); 8],
            sprite_count: 0,
            sprite0_on_line: false,

            nm_base: mirroring.nametable_base(),
        }
    }

    pub fn reset(&mut self) {
        self.ctrl.set(0);
        self.mask.set(0);
        self.status.clear();
        self.oam_addr = 0;
        self.data_buf = 0;
        self.v = VramAddr::default();
        self.t = VramAddr::default();
        self.fine_x = 0;
        self.w = false;
        self.line = -1;
        self.dot = 0;
        self.odd_frame = false;
        self.nmi_raised = false;
        self.frame_ready = false;
    }

    /// Advances one dot.
    pub fn clock(&mut self, cart: &Cartridge) {
        let rendering = self.mask.rendering();

        if self.line == -1 {
            if self.dot == 1 {
                self.status.clear();
                self.nmi_raised = false;
            }
            if rendering {
                self.bg_pipeline(cart);
                if self.dot == 256 {
                    self.v.inc_y();
                }
                if self.dot == 257 {
                    self.v.copy_x(self.t);
                }
                if (280..=304).contains(&self.dot) {
                    self.v.copy_y(self.t);
                }
                // odd frames drop the idle dot at the end of pre-render
                if self.dot == 339 {
                    if self.odd_frame {
                        self.odd_frame = false;
                        self.line = 0;
                        self.dot = 0;
                        return;
                    }
                    self.odd_frame = true;
                }
            }
        }

        if (0..240).contains(&self.line) {
            if rendering {
                self.bg_pipeline(cart);
                if self.dot == 256 {
                    self.v.inc_y();
                }
                if self.dot == 257 {
                    self.v.copy_x(self.t);
                    self.evaluate_sprites(cart);
                }
            }
            if (1..=256).contains(&self.dot) {
                self.render_pixel(cart);
            }
        }

        if self.line == 241 && self.dot == 1 {
            self.status.set_vblank(true);
            self.frame_ready = true;
            if self.ctrl.nmi_on() {
                self.nmi_raised = true;
            }
        }

        self.dot += 1;
        if self.dot > 340 {
            self.dot = 0;
            self.line += 1;
            if self.line > 260 {
                self.line = -1;
            }
        }
    }

    pub(crate) fn consume_nmi(&mut self) -> bool {
        if self.ctrl.nmi_on() && self.nmi_raised {
            self.nmi_raised = false;
            true
        } else {
            false
        }
    }

    pub fn frame(&self) -> &[u32] {
        &self.frame[..]
    }

    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    pub fn clear_frame_ready(&mut self) {
        self.frame_ready = false;
    }

    pub(crate) fn write_oam(&mut self, addr: u8, data: u8) {
        self.oam[addr as usize] = data;
    }
}

/// register surface, CPU side
impl Ppu {
    pub fn cpu_read(&mut self, cart: &Cartridge, addr: u16) -> u8 {
        match addr & 7 {
            0x02 => {
                let b = (self.status.get() & 0xe0) | (self.data_buf & 0x1f);
                self.status.set_vblank(false);
                self.nmi_raised = false;
                self.w = false;
                b
            }
            0x04 => self.oam[self.oam_addr as usize],
            0x07 => {
                let addr = self.v.addr();
                let mut data = self.data_buf;
                self.data_buf = self.read_vram(cart, addr);

                // palette reads bypass the buffer, which still picks up the
                // nametable byte underneath
                if addr >= 0x3f00 {
                    data = self.read_vram(cart, addr);
                    self.data_buf = self.read_vram(cart, addr - 0x1000);
                }

                self.v.inc(self.ctrl.addr_inc());
                data
            }
            _ => 0x00,
        }
    }

    pub fn cpu_write(&mut self, cart: &mut Cartridge, addr: u16, data: u8) {
        match addr & 7 {
            0x00 => {
                self.ctrl.set(data);
                self.t.set_nametable(self.ctrl.nametable());
                // enabling NMI while the vblank flag is up fires immediately
                if self.ctrl.nmi_on() && self.status.vblank() {
                    self.nmi_raised = true;
                }
            }
            0x01 => self.mask.set(data),
            0x03 => self.oam_addr = data,
            0x04 => {
                self.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            0x05 => {
                if !self.w {
                    self.fine_x = (data & 0x07) as u16;
                    self.t.set_coarse_x((data >> 3) as u16);
                } else {
                    self.t.set_fine_y((data & 0x07) as u16);
                    self.t.set_coarse_y((data >> 3) as u16);
                }
                self.w = !self.w;
            }
            0x06 => {
                if !self.w {
                    self.t.set_bits(8..15, (data & 0x3f) as u16);
                } else {
                    self.t.set_bits(0..8, data as u16);
                    self.v = self.t;
                }
                self.w = !self.w;
            }
            0x07 => {
                self.write_vram(cart, self.v.addr(), data);
                self.v.inc(self.ctrl.addr_inc());
            }
            _ => {}
        }
    }
}

/// VRAM space
impl Ppu {
    fn read_vram(&self, cart: &Cartridge, addr: u16) -> u8 {
        let addr = addr & 0x3fff;
        match addr {
            0x0000..=0x1fff => cart.read_chr(addr),
            0x2000..=0x3eff => self.vram[self.nm_addr(addr)],
            _ => self.palette[Self::palette_index(addr)],
        }
    }

    fn write_vram(&mut self, cart: &mut Cartridge, addr: u16, data: u8) {
        let addr = addr & 0x3fff;
        match addr {
            0x0000..=0x1fff => cart.write_chr(addr, data),
            0x2000..=0x3eff => self.vram[self.nm_addr(addr)] = data,
            _ => self.palette[Self::palette_index(addr)] = data,
        }
    }

    fn nm_addr(&self, addr: u16) -> usize {
        let n = (addr as usize >> 10) & 0x03;
        (self.nm_base[n] + (addr & 0x03ff)) as usize
    }

    /// $3F10/$3F14/$3F18/$3F1C mirror $3F00/$3F04/$3F08/$3F0C
    fn palette_index(addr: u16) -> usize {
        let index = (addr & 0x1f) as usize;
        if index & 0x13 == 0x10 {
            index & 0x0f
        } else {
            index
        }
    }
}

/// background and sprite pipeline
impl Ppu {
    fn bg_pipeline(&mut self, cart: &Cartridge) {
        if !((1..=256).contains(&self.dot) || (321..=336).contains(&self.dot)) {
            return;
        }

        if self.mask.show_bg() {
            self.bg_shift.shift();
            self.at_shift.shift();
        }

        match (self.dot - 1) % 8 {
            0 => {
                // pattern and attribute low bytes reload together so both
                // reach the fine-x mux in step
                self.bg_shift.reload(self.bg_lo, self.bg_hi);
                self.at_shift.reload(self.at_latch);
                self.nt_byte = self.read_vram(cart, self.v.tile_addr());
            }
            2 => {
                let mut at = self.read_vram(cart, self.v.attr_addr());
                // select the 2-bit group for the current 16x16 quadrant
                if self.v.get() & 0x40 != 0 {
                    at >>= 4;
                }
                if self.v.get() & 0x02 != 0 {
                    at >>= 2;
                }
                self.at_latch = at & 0x03;
            }
            4 => self.bg_lo = self.read_vram(cart, self.bg_pattern_addr()),
            6 => self.bg_hi = self.read_vram(cart, self.bg_pattern_addr() + 8),
            7 => self.v.inc_coarse_x(),
            _ => {}
        }
    }

    fn bg_pattern_addr(&self) -> u16 {
        self.ctrl.bg_pattern_table() + self.nt_byte as u16 * 16 + self.v.fine_y()
    }

    /// Scans OAM for the sprites covering the next scanline and latches
    /// their pattern bytes; stops at the 8-sprite limit.
    fn evaluate_sprites(&mut self, cart: &Cartridge) {
        self.sprite_count = 0;
        self.sprite0_on_line = false;

        let height = self.ctrl.sp_size();

        for i in 0..64 {
            let y = self.oam[i * 4] as i16;
            let row = self.line - y;
            if !(0..height).contains(&row) {
                continue;
            }
            if i == 0 {
                self.sprite0_on_line = true;
            }

            let tile = self.oam[i * 4 + 1];
            let attr = self.oam[i * 4 + 2];
            let x = self.oam[i * 4 + 3];

            let row = if attr & 0x80 != 0 { height - 1 - row } else { row };
            let pattern_addr = if height == 8 {
                self.ctrl.sp_pattern_table() + tile as u16 * 16 + row as u16
            } else {
                let table = (tile as u16 & 0x01) * 0x1000;
                let tile = (tile & 0xfe) as u16 + (row >= 8) as u16;
                table + tile * 16 + (row as u16 & 0x07)
            };

            let mut lo = self.read_vram(cart, pattern_addr);
            let mut hi = self.read_vram(cart, pattern_addr + 8);
            if attr & 0x40 != 0 {
                lo = lo.reverse_bits();
                hi = hi.reverse_bits();
            }

            self.sprites[self.sprite_count] = SpriteLine {
                x,
                attr,
                pattern_lo: lo,
                pattern_hi: hi,
            };
            self.sprite_count += 1;
            if self.sprite_count == 8 {
                break;
            }
        }
    }

    fn render_pixel(&mut self, cart: &Cartridge) {
        let x = (self.dot - 1) as usize;
        let line = self.line as usize;

        let (mut bg_pixel, mut bg_pal) = (0u8, 0u8);
        if self.mask.show_bg() && (self.mask.show_bg_left() || x >= 8) {
            bg_pixel = self.bg_shift.get(self.fine_x);
            bg_pal = self.at_shift.get(self.fine_x);
        }

        let (mut sp_pixel, mut sp_pal) = (0u8, 0u8);
        let mut sp_behind = false;
        let mut sprite0 = false;
        if self.mask.show_sp() && (self.mask.show_sp_left() || x >= 8) {
            for (i, s) in self.sprites[..self.sprite_count].iter().enumerate() {
                let offset = x as i16 - s.x as i16;
                if !(0..8).contains(&offset) {
                    continue;
                }

                let p0 = (s.pattern_lo >> (7 - offset)) & 0x01;
                let p1 = (s.pattern_hi >> (7 - offset)) & 0x01;
                let pixel = (p1 << 1) | p0;
                if pixel == 0 {
                    continue;
                }

                sp_pixel = pixel;
                sp_pal = (s.attr & 0x03) + 4;
                sp_behind = s.attr & 0x20 != 0;
                sprite0 = i == 0 && self.sprite0_on_line;
                break;
            }
        }

        let (pixel, pal) = match (bg_pixel, sp_pixel) {
            (0, 0) => (0, 0),
            (0, s) => (s, sp_pal),
            (b, 0) => (b, bg_pal),
            (b, s) => {
                // sprite 0 collides regardless of priority, except in a
                // left-masked column or at the last pixel
                let left_masked =
                    (!self.mask.show_bg_left() || !self.mask.show_sp_left()) && x < 8;
                if sprite0 && !self.status.sp0_hit() && x < 255 && !left_masked {
                    self.status.set_sp0_hit(true);
                }
                if sp_behind {
                    (b, bg_pal)
                } else {
                    (s, sp_pal)
                }
            }
        };

        let color = self.read_vram(cart, 0x3f00 + pal as u16 * 4 + pixel as u16) & 0x3f;
        self.frame[line * DISPLAY_WIDTH + x] = PALETTES[color as usize];
    }
}
