use bit_field::BitField;

/// Packed layout: N V 1 B D I Z C. Bit 5 reads back as 1; B is only ever
/// set on the pushed copy (BRK/PHP), never in the live register.
#[derive(Default, Clone, Copy)]
pub struct Status {
    pub n: bool,
    pub v: bool,
    pub b: bool,
    pub d: bool,
    pub i: bool,
    pub z: bool,
    pub c: bool,
}

impl Status {
    pub fn set_zn(&mut self, a: u8) {
        self.z = a == 0;
        self.n = a.get_bit(7);
    }

    pub fn to_u8(self) -> u8 {
        let mut b = 0b0010_0000u8;
        b.set_bit(7, self.n);
        b.set_bit(6, self.v);
        b.set_bit(4, self.b);
        b.set_bit(3, self.d);
        b.set_bit(2, self.i);
        b.set_bit(1, self.z);
        b.set_bit(0, self.c);
        b
    }
}

impl From<u8> for Status {
    fn from(b: u8) -> Self {
        Self {
            n: b.get_bit(7),
            v: b.get_bit(6),
            b: false,
            d: b.get_bit(3),
            i: b.get_bit(2),
            z: b.get_bit(1),
            c: b.get_bit(0),
        }
    }
}

impl std::fmt::Debug for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (bit, c) in [
            (self.n, 'N'),
            (self.v, 'V'),
            (false, '-'),
            (self.b, 'B'),
            (self.d, 'D'),
            (self.i, 'I'),
            (self.z, 'Z'),
            (self.c, 'C'),
        ] {
            f.write_fmt(format_args!("{}", if bit { c } else { '-' }))?;
        }
        Ok(())
    }
}
