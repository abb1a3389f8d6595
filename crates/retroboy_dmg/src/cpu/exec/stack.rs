use super::super::{Bus, Cpu};

impl Cpu {
    /// PUSH rr (4 cycles).
    pub(in crate::cpu) fn push_rr(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 | 2 => false,
            3 => {
                let [hi, _] = self.stack_reg16(self.opcode >> 4).to_be_bytes();
                self.push_byte(bus, hi);
                false
            }
            _ => {
                let [_, lo] = self.stack_reg16(self.opcode >> 4).to_be_bytes();
                self.push_byte(bus, lo);
                true
            }
        }
    }

    /// POP rr (3 cycles). POP AF drops the low nibble of F.
    pub(in crate::cpu) fn pop_rr(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.z = self.pop_byte(bus);
                false
            }
            _ => {
                self.w = self.pop_byte(bus);
                self.set_stack_reg16(self.opcode >> 4, self.wz());
                true
            }
        }
    }
}
