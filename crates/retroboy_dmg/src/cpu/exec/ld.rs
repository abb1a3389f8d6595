use super::super::{Bus, Cpu};

impl Cpu {
    /// LD r,r' (1 cycle).
    pub(in crate::cpu) fn ld_r_r(&mut self, _bus: &mut dyn Bus) -> bool {
        let value = self.reg8(self.opcode);
        self.set_reg8(self.opcode >> 3, value);
        true
    }

    /// LD r,(HL) (2 cycles).
    pub(in crate::cpu) fn ld_r_hl(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let value = bus.read8(self.regs.hl());
                self.set_reg8(self.opcode >> 3, value);
                true
            }
        }
    }

    /// LD (HL),r (2 cycles).
    pub(in crate::cpu) fn ld_hl_r(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                bus.write8(self.regs.hl(), self.reg8(self.opcode));
                true
            }
        }
    }

    /// LD r,n8 (2 cycles).
    pub(in crate::cpu) fn ld_r_n8(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let value = self.fetch_imm8(bus);
                self.set_reg8(self.opcode >> 3, value);
                true
            }
        }
    }

    /// LD (HL),n8 (3 cycles).
    pub(in crate::cpu) fn ld_hl_n8(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            _ => {
                bus.write8(self.regs.hl(), self.z);
                true
            }
        }
    }

    /// LD rr,n16 (3 cycles).
    pub(in crate::cpu) fn ld_rr_n16(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            _ => {
                self.w = self.fetch_imm8(bus);
                self.set_reg16(self.opcode >> 4, self.wz());
                true
            }
        }
    }

    /// Address for the `(BC)`, `(DE)`, `(HL+)`, `(HL-)` operand column,
    /// applying the HL post-increment/decrement.
    fn indirect_addr(&mut self) -> u16 {
        match (self.opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    /// LD (BC|DE|HL+|HL-),A (2 cycles).
    pub(in crate::cpu) fn ld_ind_a(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let addr = self.indirect_addr();
                bus.write8(addr, self.regs.a);
                true
            }
        }
    }

    /// LD A,(BC|DE|HL+|HL-) (2 cycles).
    pub(in crate::cpu) fn ld_a_ind(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let addr = self.indirect_addr();
                self.regs.a = bus.read8(addr);
                true
            }
        }
    }

    /// LD (a16),A (4 cycles).
    pub(in crate::cpu) fn ld_a16_a(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            3 => {
                self.w = self.fetch_imm8(bus);
                false
            }
            _ => {
                bus.write8(self.wz(), self.regs.a);
                true
            }
        }
    }

    /// LD A,(a16) (4 cycles).
    pub(in crate::cpu) fn ld_a_a16(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            3 => {
                self.w = self.fetch_imm8(bus);
                false
            }
            _ => {
                self.regs.a = bus.read8(self.wz());
                true
            }
        }
    }

    /// LDH (a8),A (3 cycles).
    pub(in crate::cpu) fn ldh_a8_a(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            _ => {
                bus.write8(0xFF00 | u16::from(self.z), self.regs.a);
                true
            }
        }
    }

    /// LDH A,(a8) (3 cycles).
    pub(in crate::cpu) fn ldh_a_a8(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            _ => {
                self.regs.a = bus.read8(0xFF00 | u16::from(self.z));
                true
            }
        }
    }

    /// LDH (C),A (2 cycles).
    pub(in crate::cpu) fn ldh_c_a(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                bus.write8(0xFF00 | u16::from(self.regs.c), self.regs.a);
                true
            }
        }
    }

    /// LDH A,(C) (2 cycles).
    pub(in crate::cpu) fn ldh_a_c(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                self.regs.a = bus.read8(0xFF00 | u16::from(self.regs.c));
                true
            }
        }
    }

    /// LD (a16),SP (5 cycles): low byte first.
    pub(in crate::cpu) fn ld_a16_sp(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            3 => {
                self.w = self.fetch_imm8(bus);
                false
            }
            4 => {
                let [_, lo] = self.regs.sp.to_be_bytes();
                bus.write8(self.wz(), lo);
                false
            }
            _ => {
                let [hi, _] = self.regs.sp.to_be_bytes();
                bus.write8(self.wz().wrapping_add(1), hi);
                true
            }
        }
    }

    /// LD SP,HL (2 cycles).
    pub(in crate::cpu) fn ld_sp_hl(&mut self, _bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                self.regs.sp = self.regs.hl();
                true
            }
        }
    }

    /// LD HL,SP+e8 (3 cycles).
    pub(in crate::cpu) fn ld_hl_sp_e8(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            _ => {
                let value = self.alu_sp_plus_e8(self.z);
                self.regs.set_hl(value);
                true
            }
        }
    }
}
