use super::super::{Bus, Cpu};

impl Cpu {
    /// JR e8 (3 cycles).
    pub(in crate::cpu) fn jr_e8(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            _ => {
                self.jump_relative();
                true
            }
        }
    }

    /// JR cc,e8 (2 cycles, 3 taken).
    pub(in crate::cpu) fn jr_cc(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                !self.condition(self.opcode >> 3)
            }
            _ => {
                self.jump_relative();
                true
            }
        }
    }

    fn jump_relative(&mut self) {
        let offset = self.z as i8 as i16 as u16;
        self.regs.pc = self.regs.pc.wrapping_add(offset);
    }

    /// JP a16 (4 cycles).
    pub(in crate::cpu) fn jp_a16(&mut self, bus: &mut dyn Bus) -> bool {
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
                self.regs.pc = self.wz();
                true
            }
        }
    }

    /// JP cc,a16 (3 cycles, 4 taken).
    pub(in crate::cpu) fn jp_cc(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            3 => {
                self.w = self.fetch_imm8(bus);
                !self.condition(self.opcode >> 3)
            }
            _ => {
                self.regs.pc = self.wz();
                true
            }
        }
    }

    /// JP HL (1 cycle).
    pub(in crate::cpu) fn jp_hl(&mut self, _bus: &mut dyn Bus) -> bool {
        self.regs.pc = self.regs.hl();
        true
    }

    /// CALL a16 (6 cycles).
    pub(in crate::cpu) fn call_a16(&mut self, bus: &mut dyn Bus) -> bool {
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
            _ => self.call_tail(bus),
        }
    }

    /// CALL cc,a16 (3 cycles, 6 taken).
    pub(in crate::cpu) fn call_cc(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.fetch_imm8(bus);
                false
            }
            3 => {
                self.w = self.fetch_imm8(bus);
                !self.condition(self.opcode >> 3)
            }
            _ => self.call_tail(bus),
        }
    }

    /// Cycles 4..=6 shared by CALL and taken CALL cc: internal delay, push
    /// PC high, push PC low and jump to `wz`.
    fn call_tail(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            4 => false,
            5 => {
                let [hi, _] = self.regs.pc.to_be_bytes();
                self.push_byte(bus, hi);
                false
            }
            _ => {
                let [_, lo] = self.regs.pc.to_be_bytes();
                self.push_byte(bus, lo);
                self.regs.pc = self.wz();
                true
            }
        }
    }

    /// RST n (4 cycles).
    pub(in crate::cpu) fn rst(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => false,
            3 => {
                let [hi, _] = self.regs.pc.to_be_bytes();
                self.push_byte(bus, hi);
                false
            }
            _ => {
                let [_, lo] = self.regs.pc.to_be_bytes();
                self.push_byte(bus, lo);
                self.regs.pc = u16::from(self.opcode & 0x38);
                true
            }
        }
    }

    /// RET (4 cycles).
    pub(in crate::cpu) fn ret(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.pop_byte(bus);
                false
            }
            3 => {
                self.w = self.pop_byte(bus);
                false
            }
            _ => {
                self.regs.pc = self.wz();
                true
            }
        }
    }

    /// RETI (4 cycles). IME is set immediately, without the `EI` delay.
    pub(in crate::cpu) fn reti(&mut self, bus: &mut dyn Bus) -> bool {
        let done = self.ret(bus);
        if done {
            self.ime = true;
            self.ime_delay = 0;
        }
        done
    }

    /// RET cc (2 cycles, 5 taken).
    pub(in crate::cpu) fn ret_cc(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => !self.condition(self.opcode >> 3),
            3 => {
                self.z = self.pop_byte(bus);
                false
            }
            4 => {
                self.w = self.pop_byte(bus);
                false
            }
            _ => {
                self.regs.pc = self.wz();
                true
            }
        }
    }
}
