use bit_field::BitField;
use std::path::Path;
use thiserror::Error;

mod mapper000;

const CHR_RAM_SIZE: usize = 0x2000;

const MIRRORING_MAP: [[u16; 4]; 3] = [
    [0x000, 0x000, 0x400, 0x400], // Horizontal
    [0x000, 0x400, 0x000, 0x400], // Vertical
    [0x000, 0x400, 0x000, 0x400], // FourScreen, folded into 2K
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Mirroring {
    Horizontal = 0,
    Vertical = 1,
    FourScreen = 2,
}

impl Mirroring {
    pub(crate) fn nametable_base(self) -> [u16; 4] {
        MIRRORING_MAP[self as usize]
    }
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("failed to read rom image: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid iNES header")]
    InvalidHeader,
}

pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_writable: bool,
    mirroring: Mirroring,
    mapper_id: u8,

    mapper: Box<dyn Mapper + Send>,
}

impl Cartridge {
    /// Parses an iNES image. CHR-RAM is allocated when the image carries no
    /// CHR banks. Any mapper id other than 0 loads with NROM mapping and a
    /// warning; most such games will misbehave.
    pub fn load(data: &[u8]) -> Result<Self, CartError> {
        let header = data.get(..16).ok_or(CartError::InvalidHeader)?;
        if header[..4] != [b'N', b'E', b'S', 0x1a] {
            return Err(CartError::InvalidHeader);
        }

        let prg_banks = header[4] as usize;
        let chr_banks = header[5] as usize;
        let f6 = header[6];
        let f7 = header[7];

        let mirroring = if f6.get_bit(3) {
            Mirroring::FourScreen
        } else if f6.get_bit(0) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let mapper_id = (f7 & 0xf0) | (f6 >> 4);

        let offset = 0x10 + (f6.get_bit(2) as usize) * 0x200;
        let prg_len = prg_banks * 0x4000;
        let prg_rom = data
            .get(offset..offset + prg_len)
            .ok_or(CartError::InvalidHeader)?
            .to_vec();
        if prg_rom.is_empty() {
            return Err(CartError::InvalidHeader);
        }

        let (chr, chr_writable) = if chr_banks == 0 {
            (vec![0u8; CHR_RAM_SIZE], true)
        } else {
            let offset = offset + prg_len;
            let chr_len = chr_banks * 0x2000;
            let chr = data
                .get(offset..offset + chr_len)
                .ok_or(CartError::InvalidHeader)?
                .to_vec();
            (chr, false)
        };

        log::info!(
            "loaded rom: PRG {} x 16KB, CHR {} x 8KB, mapper {:03}, {:?}",
            prg_banks,
            chr_banks,
            mapper_id,
            mirroring
        );
        if mapper_id != 0 {
            log::warn!("mapper {:03} is not supported, running as NROM", mapper_id);
        }

        Ok(Self {
            prg_rom,
            chr,
            chr_writable,
            mirroring,
            mapper_id,
            mapper: Box::new(mapper000::Nrom::new(prg_banks)),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CartError> {
        Self::load(&std::fs::read(path)?)
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0xffff => self.mapper.read_prg(&self.prg_rom, addr),
            _ => 0x00,
        }
    }

    pub fn write(&mut self, _addr: u16, _data: u8) {
        // NROM has no writable PRG
    }

    pub fn read_chr(&self, addr: u16) -> u8 {
        self.mapper.read_chr(&self.chr, addr)
    }

    pub fn write_chr(&mut self, addr: u16, data: u8) {
        if self.chr_writable {
            self.mapper.write_chr(&mut self.chr, addr, data);
        }
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }
}

#[allow(unused_variables)]
pub trait Mapper {
    fn read_prg(&self, prg: &[u8], addr: u16) -> u8;
    fn write_prg(&mut self, prg: &mut [u8], addr: u16, data: u8) {}

    fn read_chr(&self, chr: &[u8], addr: u16) -> u8;
    fn write_chr(&self, chr: &mut [u8], addr: u16, data: u8) {
        chr[addr as usize % chr.len()] = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(prg_banks: u8, chr_banks: u8, flags6: u8) -> Vec<u8> {
        let mut data = vec![b'N', b'E', b'S', 0x1a, prg_banks, chr_banks, flags6, 0];
        data.resize(16, 0);
        data.resize(16 + prg_banks as usize * 0x4000 + chr_banks as usize * 0x2000, 0);
        data
    }

    #[test]
    fn rejects_bad_magic() {
        assert!(matches!(
            Cartridge::load(&[0u8; 32]),
            Err(CartError::InvalidHeader)
        ));
    }

    #[test]
    fn single_bank_prg_mirrors() {
        let mut data = image(1, 1, 0);
        data[16] = 0xab; // first PRG byte
        let cart = Cartridge::load(&data).unwrap();
        assert_eq!(cart.read(0x8000), 0xab);
        assert_eq!(cart.read(0xc000), 0xab);
    }

    #[test]
    fn chr_ram_only_when_no_chr_banks() {
        let mut cart = Cartridge::load(&image(1, 0, 0)).unwrap();
        cart.write_chr(0x0123, 0x55);
        assert_eq!(cart.read_chr(0x0123), 0x55);

        let mut cart = Cartridge::load(&image(1, 1, 0)).unwrap();
        cart.write_chr(0x0123, 0x55);
        assert_eq!(cart.read_chr(0x0123), 0x00);
    }

    #[test]
    fn mirroring_from_flags() {
        assert_eq!(
            Cartridge::load(&image(1, 1, 0b0001)).unwrap().mirroring(),
            Mirroring::Vertical
        );
        assert_eq!(
            Cartridge::load(&image(1, 1, 0b1000)).unwrap().mirroring(),
            Mirroring::FourScreen
        );
    }
}
