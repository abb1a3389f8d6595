use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Read an 8-bit register by its 3-bit opcode encoding:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 7=A.
    ///
    /// Index 6 is the (HL) memory operand; handlers access it on the
    /// right machine cycle themselves, so it never reaches here.
    #[inline]
    pub(super) fn reg8(&self, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            7 => self.regs.a,
            _ => 0xFF,
        }
    }

    #[inline]
    pub(super) fn set_reg8(&mut self, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            7 => self.regs.a = value,
            _ => {}
        }
    }

    /// 16-bit register by the `rr` encoding of LD/INC/DEC/ADD:
    /// 0=BC, 1=DE, 2=HL, 3=SP.
    #[inline]
    pub(super) fn reg16(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn set_reg16(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.regs.sp = value,
        }
    }

    /// 16-bit register by the PUSH/POP encoding: 0=BC, 1=DE, 2=HL, 3=AF.
    #[inline]
    pub(super) fn stack_reg16(&self, index: u8) -> u16 {
        match index & 0x03 {
            3 => self.regs.af(),
            other => self.reg16(other),
        }
    }

    #[inline]
    pub(super) fn set_stack_reg16(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            3 => self.regs.set_af(value),
            other => self.set_reg16(other, value),
        }
    }

    /// Condition by the `cc` encoding: 0=NZ, 1=Z, 2=NC, 3=C.
    #[inline]
    pub(super) fn condition(&self, cc: u8) -> bool {
        match cc & 0x03 {
            0 => !self.get_flag(Flag::Z),
            1 => self.get_flag(Flag::Z),
            2 => !self.get_flag(Flag::C),
            _ => self.get_flag(Flag::C),
        }
    }

    /// Read the byte at PC and advance PC. Operand fetches are never affected
    /// by the HALT bug; only the opcode fetch in `step` is.
    #[inline]
    pub(super) fn fetch_imm8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// The 16-bit value assembled from the `z`/`w` latches.
    #[inline]
    pub(super) fn wz(&self) -> u16 {
        u16::from_be_bytes([self.w, self.z])
    }

    #[inline]
    pub(super) fn push_byte(&mut self, bus: &mut dyn Bus, value: u8) {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, value);
    }

    #[inline]
    pub(super) fn pop_byte(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        value
    }
}
