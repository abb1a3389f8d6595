use super::super::{Bus, Cpu, Flag};

impl Cpu {
    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r (1 cycle).
    pub(in crate::cpu) fn alu_a_r(&mut self, _bus: &mut dyn Bus) -> bool {
        let value = self.reg8(self.opcode);
        self.alu_op(self.opcode >> 3, value);
        true
    }

    /// ALU A,(HL) (2 cycles).
    pub(in crate::cpu) fn alu_a_hl(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let value = bus.read8(self.regs.hl());
                self.alu_op(self.opcode >> 3, value);
                true
            }
        }
    }

    /// ALU A,n8 (2 cycles).
    pub(in crate::cpu) fn alu_a_n8(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let value = self.fetch_imm8(bus);
                self.alu_op(self.opcode >> 3, value);
                true
            }
        }
    }

    /// RLCA/RRCA/RLA/RRA. Same as the CB rotates except Z is always cleared.
    pub(in crate::cpu) fn rotate_a(&mut self, _bus: &mut dyn Bus) -> bool {
        self.regs.a = self.alu_shift(self.opcode >> 3, self.regs.a);
        self.set_flag(Flag::Z, false);
        true
    }

    pub(in crate::cpu) fn daa(&mut self, _bus: &mut dyn Bus) -> bool {
        self.alu_daa();
        true
    }

    pub(in crate::cpu) fn cpl(&mut self, _bus: &mut dyn Bus) -> bool {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        true
    }

    pub(in crate::cpu) fn scf(&mut self, _bus: &mut dyn Bus) -> bool {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        true
    }

    pub(in crate::cpu) fn ccf(&mut self, _bus: &mut dyn Bus) -> bool {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        true
    }

    /// ADD HL,rr (2 cycles).
    pub(in crate::cpu) fn add_hl_rr(&mut self, _bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            _ => {
                let value = self.reg16(self.opcode >> 4);
                self.alu_add16_hl(value);
                true
            }
        }
    }

    /// ADD SP,e8 (4 cycles): flags settle on cycle 3, SP on cycle 4.
    pub(in crate::cpu) fn add_sp_e8(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            3 => {
                let result = self.alu_sp_plus_e8(self.z);
                self.w = (result >> 8) as u8;
                self.mdr = result as u8;
                false
            }
            _ => {
                self.regs.sp = u16::from_be_bytes([self.w, self.mdr]);
                true
            }
        }
    }
}
