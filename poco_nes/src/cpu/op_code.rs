use super::addressing::AddrMode;
use super::Cpu;
use crate::bus::Bus;

type Op = fn(&mut Cpu, &mut Bus);

// Jam opcodes and the unstable high-address stores decode as 2-cycle NOPs
// rather than halting.
#[rustfmt::skip]
pub const OP_FUNCS: [Op; 256] = [
//     00        01        02        03        04        05        06        07        08        09        0a        0b        0c        0d        0e        0f
    Cpu::brk, Cpu::ora, Cpu::nop, Cpu::slo, Cpu::nop, Cpu::ora, Cpu::asl, Cpu::slo, Cpu::php, Cpu::ora, Cpu::asl, Cpu::nop, Cpu::nop, Cpu::ora, Cpu::asl, Cpu::slo, // 00
    Cpu::bpl, Cpu::ora, Cpu::nop, Cpu::slo, Cpu::nop, Cpu::ora, Cpu::asl, Cpu::slo, Cpu::clc, Cpu::ora, Cpu::nop, Cpu::slo, Cpu::top, Cpu::ora, Cpu::asl, Cpu::slo, // 10
    Cpu::jsr, Cpu::and, Cpu::nop, Cpu::rla, Cpu::bit, Cpu::and, Cpu::rol, Cpu::rla, Cpu::plp, Cpu::and, Cpu::rol, Cpu::nop, Cpu::bit, Cpu::and, Cpu::rol, Cpu::rla, // 20
    Cpu::bmi, Cpu::and, Cpu::nop, Cpu::rla, Cpu::nop, Cpu::and, Cpu::rol, Cpu::rla, Cpu::sec, Cpu::and, Cpu::nop, Cpu::rla, Cpu::top, Cpu::and, Cpu::rol, Cpu::rla, // 30
    Cpu::rti, Cpu::eor, Cpu::nop, Cpu::sre, Cpu::nop, Cpu::eor, Cpu::lsr, Cpu::sre, Cpu::pha, Cpu::eor, Cpu::lsr, Cpu::nop, Cpu::jmp, Cpu::eor, Cpu::lsr, Cpu::sre, // 40
    Cpu::bvc, Cpu::eor, Cpu::nop, Cpu::sre, Cpu::nop, Cpu::eor, Cpu::lsr, Cpu::sre, Cpu::cli, Cpu::eor, Cpu::nop, Cpu::sre, Cpu::top, Cpu::eor, Cpu::lsr, Cpu::sre, // 50
    Cpu::rts, Cpu::adc, Cpu::nop, Cpu::rra, Cpu::nop, Cpu::adc, Cpu::ror, Cpu::rra, Cpu::pla, Cpu::adc, Cpu::ror, Cpu::nop, Cpu::jmp, Cpu::adc, Cpu::ror, Cpu::rra, // 60
    Cpu::bvs, Cpu::adc, Cpu::nop, Cpu::rra, Cpu::nop, Cpu::adc, Cpu::ror, Cpu::rra, Cpu::sei, Cpu::adc, Cpu::nop, Cpu::rra, Cpu::top, Cpu::adc, Cpu::ror, Cpu::rra, // 70
    Cpu::nop, Cpu::sta, Cpu::nop, Cpu::sax, Cpu::sty, Cpu::sta, Cpu::stx, Cpu::sax, Cpu::dey, Cpu::nop, Cpu::txa, Cpu::nop, Cpu::sty, Cpu::sta, Cpu::stx, Cpu::sax, // 80
    Cpu::bcc, Cpu::sta, Cpu::nop, Cpu::nop, Cpu::sty, Cpu::sta, Cpu::stx, Cpu::sax, Cpu::tya, Cpu::sta, Cpu::txs, Cpu::nop, Cpu::nop, Cpu::sta, Cpu::nop, Cpu::nop, // 90
    Cpu::ldy, Cpu::lda, Cpu::ldx, Cpu::lax, Cpu::ldy, Cpu::lda, Cpu::ldx, Cpu::lax, Cpu::tay, Cpu::lda, Cpu::tax, Cpu::nop, Cpu::ldy, Cpu::lda, Cpu::ldx, Cpu::lax, // a0
    Cpu::bcs, Cpu::lda, Cpu::nop, Cpu::lax, Cpu::ldy, Cpu::lda, Cpu::ldx, Cpu::lax, Cpu::clv, Cpu::lda, Cpu::tsx, Cpu::nop, Cpu::ldy, Cpu::lda, Cpu::ldx, Cpu::lax, // b0
    Cpu::cpy, Cpu::cmp, Cpu::nop, Cpu::dcp, Cpu::cpy, Cpu::cmp, Cpu::dec, Cpu::dcp, Cpu::iny, Cpu::cmp, Cpu::dex, Cpu::nop, Cpu::cpy, Cpu::cmp, Cpu::dec, Cpu::dcp, // c0
    Cpu::bne, Cpu::cmp, Cpu::nop, Cpu::dcp, Cpu::nop, Cpu::cmp, Cpu::dec, Cpu::dcp, Cpu::cld, Cpu::cmp, Cpu::nop, Cpu::dcp, Cpu::top, Cpu::cmp, Cpu::dec, Cpu::dcp, // d0
    Cpu::cpx, Cpu::sbc, Cpu::nop, Cpu::isb, Cpu::cpx, Cpu::sbc, Cpu::inc, Cpu::isb, Cpu::inx, Cpu::sbc, Cpu::nop, Cpu::sbc, Cpu::cpx, Cpu::sbc, Cpu::inc, Cpu::isb, // e0
    Cpu::beq, Cpu::sbc, Cpu::nop, Cpu::isb, Cpu::nop, Cpu::sbc, Cpu::inc, Cpu::isb, Cpu::sed, Cpu::sbc, Cpu::nop, Cpu::isb, Cpu::top, Cpu::sbc, Cpu::inc, Cpu::isb, // f0
];

#[rustfmt::skip]
pub const OP_NAMES: [&str; 256] = [
//   00     01     02     03     04     05     06     07     08     09     0a     0b     0c     0d     0e     0f
    "BRK", "ORA", "NOP", "SLO", "NOP", "ORA", "ASL", "SLO", "PHP", "ORA", "ASL", "NOP", "NOP", "ORA", "ASL", "SLO", // 00
    "BPL", "ORA", "NOP", "SLO", "NOP", "ORA", "ASL", "SLO", "CLC", "ORA", "NOP", "SLO", "NOP", "ORA", "ASL", "SLO", // 10
    "JSR", "AND", "NOP", "RLA", "BIT", "AND", "ROL", "RLA", "PLP", "AND", "ROL", "NOP", "BIT", "AND", "ROL", "RLA", // 20
    "BMI", "AND", "NOP", "RLA", "NOP", "AND", "ROL", "RLA", "SEC", "AND", "NOP", "RLA", "NOP", "AND", "ROL", "RLA", // 30
    "RTI", "EOR", "NOP", "SRE", "NOP", "EOR", "LSR", "SRE", "PHA", "EOR", "LSR", "NOP", "JMP", "EOR", "LSR", "SRE", // 40
    "BVC", "EOR", "NOP", "SRE", "NOP", "EOR", "LSR", "SRE", "CLI", "EOR", "NOP", "SRE", "NOP", "EOR", "LSR", "SRE", // 50
    "RTS", "ADC", "NOP", "RRA", "NOP", "ADC", "ROR", "RRA", "PLA", "ADC", "ROR", "NOP", "JMP", "ADC", "ROR", "RRA", // 60
    "BVS", "ADC", "NOP", "RRA", "NOP", "ADC", "ROR", "RRA", "SEI", "ADC", "NOP", "RRA", "NOP", "ADC", "ROR", "RRA", // 70
    "NOP", "STA", "NOP", "SAX", "STY", "STA", "STX", "SAX", "DEY", "NOP", "TXA", "NOP", "STY", "STA", "STX", "SAX", // 80
    "BCC", "STA", "NOP", "NOP", "STY", "STA", "STX", "SAX", "TYA", "STA", "TXS", "NOP", "NOP", "STA", "NOP", "NOP", // 90
    "LDY", "LDA", "LDX", "LAX", "LDY", "LDA", "LDX", "LAX", "TAY", "LDA", "TAX", "NOP", "LDY", "LDA", "LDX", "LAX", // a0
    "BCS", "LDA", "NOP", "LAX", "LDY", "LDA", "LDX", "LAX", "CLV", "LDA", "TSX", "NOP", "LDY", "LDA", "LDX", "LAX", // b0
    "CPY", "CMP", "NOP", "DCP", "CPY", "CMP", "DEC", "DCP", "INY", "CMP", "DEX", "NOP", "CPY", "CMP", "DEC", "DCP", // c0
    "BNE", "CMP", "NOP", "DCP", "NOP", "CMP", "DEC", "DCP", "CLD", "CMP", "NOP", "DCP", "NOP", "CMP", "DEC", "DCP", // d0
    "CPX", "SBC", "NOP", "ISB", "CPX", "SBC", "INC", "ISB", "INX", "SBC", "NOP", "SBC", "CPX", "SBC", "INC", "ISB", // e0
    "BEQ", "SBC", "NOP", "ISB", "NOP", "SBC", "INC", "ISB", "SED", "SBC", "NOP", "ISB", "NOP", "SBC", "INC", "ISB", // f0
];

// Base cycle cost per opcode. Read instructions on abs,X / abs,Y / (zp),Y
// add one on a page cross; taken branches add their own penalties. Store and
// read-modify-write forms already carry the worst case.
#[rustfmt::skip]
pub const OP_CYCLES: [u8; 256] = [
//  00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f
    7, 6, 2, 8, 3, 3, 5, 5, 3, 2, 2, 2, 4, 4, 6, 6, // 00
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 10
    6, 6, 2, 8, 3, 3, 5, 5, 4, 2, 2, 2, 4, 4, 6, 6, // 20
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 30
    6, 6, 2, 8, 3, 3, 5, 5, 3, 2, 2, 2, 3, 4, 6, 6, // 40
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 50
    6, 6, 2, 8, 3, 3, 5, 5, 4, 2, 2, 2, 5, 4, 6, 6, // 60
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 70
    2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4, // 80
    2, 6, 2, 2, 4, 4, 4, 4, 2, 5, 2, 2, 2, 5, 2, 2, // 90
    2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4, // a0
    2, 5, 2, 5, 4, 4, 4, 4, 2, 4, 2, 2, 4, 4, 4, 4, // b0
    2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6, // c0
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // d0
    2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6, // e0
    2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // f0
];

impl Cpu {
    fn get_operand(&self, bus: &mut Bus) -> u8 {
        match self.op_mode {
            AddrMode::IMP => unreachable!(),
            AddrMode::ACC => self.a,
            _ => bus.cpu_read(self.op_address),
        }
    }

    fn put_operand(&mut self, op: u8, bus: &mut Bus) {
        if self.op_mode == AddrMode::ACC {
            self.a = op;
        } else {
            bus.cpu_write(self.op_address, op);
        }
    }

    fn add_cross_page(&mut self) {
        if self.cross_page {
            self.cycles += 1;
        }
    }

    fn nop(&mut self, _: &mut Bus) {}

    fn top(&mut self, _: &mut Bus) {
        self.add_cross_page();
    }
}

/// arith
impl Cpu {
    fn adc(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self._adc(op);
        self.add_cross_page();
    }

    fn sbc(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self._adc(!op);
        self.add_cross_page();
    }

    fn and(&mut self, bus: &mut Bus) {
        self.a &= self.get_operand(bus);
        self.p.set_zn(self.a);
        self.add_cross_page();
    }

    fn ora(&mut self, bus: &mut Bus) {
        self.a |= self.get_operand(bus);
        self.p.set_zn(self.a);
        self.add_cross_page();
    }

    fn eor(&mut self, bus: &mut Bus) {
        self.a ^= self.get_operand(bus);
        self.p.set_zn(self.a);
        self.add_cross_page();
    }

    fn inc(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus).wrapping_add(1);
        bus.cpu_write(self.op_address, op);
        self.p.set_zn(op);
    }

    fn inx(&mut self, _: &mut Bus) {
        self.x = self.x.wrapping_add(1);
        self.p.set_zn(self.x);
    }

    fn iny(&mut self, _: &mut Bus) {
        self.y = self.y.wrapping_add(1);
        self.p.set_zn(self.y);
    }

    fn dec(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus).wrapping_sub(1);
        bus.cpu_write(self.op_address, op);
        self.p.set_zn(op);
    }

    fn dex(&mut self, _: &mut Bus) {
        self.x = self.x.wrapping_sub(1);
        self.p.set_zn(self.x);
    }

    fn dey(&mut self, _: &mut Bus) {
        self.y = self.y.wrapping_sub(1);
        self.p.set_zn(self.y);
    }

    fn asl(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self.p.c = (op & 0x80) != 0;

        let op = op << 1;
        self.p.set_zn(op);
        self.put_operand(op, bus);
    }

    fn lsr(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self.p.c = (op & 0x01) != 0;

        let op = op >> 1;
        self.p.set_zn(op);
        self.put_operand(op, bus);
    }

    fn rol(&mut self, bus: &mut Bus) {
        let c = self.p.c as u8;
        let op = self.get_operand(bus);
        self.p.c = (op & 0x80) != 0;

        let op = (op << 1) | c;
        self.p.set_zn(op);
        self.put_operand(op, bus);
    }

    fn ror(&mut self, bus: &mut Bus) {
        let c = self.p.c as u8;
        let op = self.get_operand(bus);
        self.p.c = (op & 0x01) != 0;

        let op = (op >> 1) | (c << 7);
        self.p.set_zn(op);
        self.put_operand(op, bus);
    }
}

/// branch and jump
impl Cpu {
    fn brk(&mut self, bus: &mut Bus) {
        self.pc = self.pc.wrapping_add(1);
        self.push_word(self.pc, bus);
        self.push_byte(self.p.to_u8() | 0b0001_0000, bus);
        self.p.i = true;
        self.pc = self.read_word(super::IRQ_VECTOR, bus);
    }

    fn bcc(&mut self, _: &mut Bus) {
        self._branch(!self.p.c);
    }

    fn bcs(&mut self, _: &mut Bus) {
        self._branch(self.p.c);
    }

    fn beq(&mut self, _: &mut Bus) {
        self._branch(self.p.z);
    }

    fn bmi(&mut self, _: &mut Bus) {
        self._branch(self.p.n);
    }

    fn bne(&mut self, _: &mut Bus) {
        self._branch(!self.p.z);
    }

    fn bpl(&mut self, _: &mut Bus) {
        self._branch(!self.p.n);
    }

    fn bvc(&mut self, _: &mut Bus) {
        self._branch(!self.p.v);
    }

    fn bvs(&mut self, _: &mut Bus) {
        self._branch(self.p.v);
    }

    fn jmp(&mut self, _: &mut Bus) {
        self.pc = self.op_address;
    }

    fn jsr(&mut self, bus: &mut Bus) {
        self.push_word(self.pc.wrapping_sub(1), bus);
        self.pc = self.op_address;
    }

    fn rti(&mut self, bus: &mut Bus) {
        self.p = self.pop_byte(bus).into();
        self.pc = self.pop_word(bus);
    }

    fn rts(&mut self, bus: &mut Bus) {
        self.pc = self.pop_word(bus).wrapping_add(1);
    }
}

/// move
impl Cpu {
    fn lda(&mut self, bus: &mut Bus) {
        self.a = self.get_operand(bus);
        self.p.set_zn(self.a);
        self.add_cross_page();
    }

    fn ldx(&mut self, bus: &mut Bus) {
        self.x = self.get_operand(bus);
        self.p.set_zn(self.x);
        self.add_cross_page();
    }

    fn ldy(&mut self, bus: &mut Bus) {
        self.y = self.get_operand(bus);
        self.p.set_zn(self.y);
        self.add_cross_page();
    }

    fn pha(&mut self, bus: &mut Bus) {
        self.push_byte(self.a, bus);
    }

    fn php(&mut self, bus: &mut Bus) {
        self.push_byte(self.p.to_u8() | 0b0001_0000, bus);
    }

    fn pla(&mut self, bus: &mut Bus) {
        self.a = self.pop_byte(bus);
        self.p.set_zn(self.a);
    }

    fn plp(&mut self, bus: &mut Bus) {
        self.p = self.pop_byte(bus).into();
    }

    fn sta(&mut self, bus: &mut Bus) {
        bus.cpu_write(self.op_address, self.a);
    }

    fn stx(&mut self, bus: &mut Bus) {
        bus.cpu_write(self.op_address, self.x);
    }

    fn sty(&mut self, bus: &mut Bus) {
        bus.cpu_write(self.op_address, self.y);
    }

    fn tax(&mut self, _: &mut Bus) {
        self.x = self.a;
        self.p.set_zn(self.x);
    }

    fn tay(&mut self, _: &mut Bus) {
        self.y = self.a;
        self.p.set_zn(self.y);
    }

    fn tsx(&mut self, _: &mut Bus) {
        self.x = self.sp;
        self.p.set_zn(self.x);
    }

    fn txs(&mut self, _: &mut Bus) {
        self.sp = self.x;
    }

    fn txa(&mut self, _: &mut Bus) {
        self.a = self.x;
        self.p.set_zn(self.a);
    }

    fn tya(&mut self, _: &mut Bus) {
        self.a = self.y;
        self.p.set_zn(self.a);
    }
}

/// flags and compares
impl Cpu {
    fn bit(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self.p.z = (self.a & op) == 0;
        self.p.n = (op & 0x80) != 0;
        self.p.v = (op & 0x40) != 0;
    }

    fn cmp(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self._cmp(self.a, op);
        self.add_cross_page();
    }

    fn cpx(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self._cmp(self.x, op);
    }

    fn cpy(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self._cmp(self.y, op);
    }

    fn clc(&mut self, _: &mut Bus) {
        self.p.c = false;
    }

    fn cld(&mut self, _: &mut Bus) {
        self.p.d = false;
    }

    fn cli(&mut self, _: &mut Bus) {
        self.p.i = false;
    }

    fn clv(&mut self, _: &mut Bus) {
        self.p.v = false;
    }

    fn sec(&mut self, _: &mut Bus) {
        self.p.c = true;
    }

    fn sed(&mut self, _: &mut Bus) {
        self.p.d = true;
    }

    fn sei(&mut self, _: &mut Bus) {
        self.p.i = true;
    }
}

/// unofficial
impl Cpu {
    fn lax(&mut self, bus: &mut Bus) {
        self.a = self.get_operand(bus);
        self.x = self.a;
        self.p.set_zn(self.a);
        self.add_cross_page();
    }

    fn sax(&mut self, bus: &mut Bus) {
        bus.cpu_write(self.op_address, self.a & self.x);
    }

    fn dcp(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus).wrapping_sub(1);
        bus.cpu_write(self.op_address, op);
        self._cmp(self.a, op);
    }

    fn isb(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus).wrapping_add(1);
        bus.cpu_write(self.op_address, op);
        self._adc(!op);
    }

    fn slo(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self.p.c = (op & 0x80) != 0;

        let op = op << 1;
        bus.cpu_write(self.op_address, op);
        self.a |= op;
        self.p.set_zn(self.a);
    }

    fn rla(&mut self, bus: &mut Bus) {
        let c = self.p.c as u8;
        let op = self.get_operand(bus);
        self.p.c = (op & 0x80) != 0;

        let op = (op << 1) | c;
        bus.cpu_write(self.op_address, op);
        self.a &= op;
        self.p.set_zn(self.a);
    }

    fn sre(&mut self, bus: &mut Bus) {
        let op = self.get_operand(bus);
        self.p.c = (op & 0x01) != 0;

        let op = op >> 1;
        bus.cpu_write(self.op_address, op);
        self.a ^= op;
        self.p.set_zn(self.a);
    }

    fn rra(&mut self, bus: &mut Bus) {
        let c = self.p.c as u8;
        let op = self.get_operand(bus);
        self.p.c = (op & 0x01) != 0;

        let op = (op >> 1) | (c << 7);
        bus.cpu_write(self.op_address, op);
        self._adc(op);
    }
}

impl Cpu {
    fn _adc(&mut self, op: u8) {
        let sum = self.a as u16 + op as u16 + self.p.c as u16;

        self.p.c = sum > 0xff;
        self.p.v = (!(self.a ^ op) & (self.a ^ sum as u8) & 0x80) != 0;
        self.a = sum as u8;
        self.p.set_zn(self.a);
    }

    fn _branch(&mut self, taken: bool) {
        if taken {
            self.cycles += 1;
            self.pc = self.op_address;
            self.add_cross_page();
        }
    }

    fn _cmp(&mut self, a: u8, b: u8) {
        self.p.c = a >= b;
        self.p.z = a == b;
        self.p.n = (a.wrapping_sub(b) & 0x80) != 0;
    }
}
