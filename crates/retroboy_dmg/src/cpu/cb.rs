use super::{Bus, Cpu};

impl Cpu {
    /// 0xCB prefix. The secondary opcode is fetched on cycle 2; register
    /// forms finish there, `BIT b,(HL)` reads on cycle 3 and the other
    /// `(HL)` forms read on cycle 3 and write back on cycle 4.
    pub(in crate::cpu) fn prefix_cb(&mut self, bus: &mut dyn Bus) -> bool {
        match self.m_cycle {
            1 => false,
            2 => {
                self.cb_opcode = self.fetch_imm8(bus);
                let target = self.cb_opcode & 0x07;
                if target == 6 {
                    return false;
                }
                let value = self.reg8(target);
                if let Some(result) = self.cb_execute(value) {
                    self.set_reg8(target, result);
                }
                true
            }
            3 => {
                self.mdr = bus.read8(self.regs.hl());
                match self.cb_execute(self.mdr) {
                    Some(result) => {
                        self.mdr = result;
                        false
                    }
                    None => true,
                }
            }
            _ => {
                bus.write8(self.regs.hl(), self.mdr);
                true
            }
        }
    }

    /// Apply the current CB operation to `value`. Returns the value to
    /// write back, or `None` for `BIT`, which only sets flags.
    fn cb_execute(&mut self, value: u8) -> Option<u8> {
        let op = self.cb_opcode;
        let bit = (op >> 3) & 0x07;
        match op >> 6 {
            0 => Some(self.alu_shift(bit, value)),
            1 => {
                self.alu_bit(bit, value);
                None
            }
            2 => Some(value & !(1 << bit)),
            _ => Some(value | (1 << bit)),
        }
    }
}
