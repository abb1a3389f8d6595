use super::super::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn inc_r(&mut self, _bus: &mut dyn Bus) -> bool {
        let index = self.opcode >> 3;
        let value = self.alu_inc8(self.reg8(index));
        self.set_reg8(index, value);
        true
    }

    pub(in crate::cpu) fn dec_r(&mut self, _bus: &mut dyn Bus) -> bool {
        let index = self.opcode >> 3;
        let value = self.alu_dec8(self.reg8(index));
        self.set_reg8(index, value);
        true
    }

    /// INC (HL) (3 cycles): read on 2, write on 3.
    pub(in crate::cpu) fn inc_hl_ind(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.mdr = bus.read8(self.regs.hl());
                false
            }
            _ => {
                let value = self.alu_inc8(self.mdr);
                bus.write8(self.regs.hl(), value);
                true
            }
        }
    }

    /// DEC (HL) (3 cycles).
    pub(in crate::cpu) fn dec_hl_ind(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.mdr = bus.read8(self.regs.hl());
                false
            }
            _ => {
                let value = self.alu_dec8(self.mdr);
                bus.write8(self.regs.hl(), value);
                true
            }
        }
    }

    /// INC rr (2 cycles, no flags).
    pub(in crate::cpu) fn inc_rr(&mut self, _bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let index = self.opcode >> 4;
                self.set_reg16(index, self.reg16(index).wrapping_add(1));
                true
            }
        }
    }

    /// DEC rr (2 cycles, no flags).
    pub(in crate::cpu) fn dec_rr(&mut self, _bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let index = self.opcode >> 4;
                self.set_reg16(index, self.reg16(index).wrapping_sub(1));
                true
            }
        }
    }
}
