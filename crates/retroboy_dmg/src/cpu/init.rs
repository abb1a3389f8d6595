use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A core as the boot ROM leaves it: IME clear, nothing in flight.
    pub fn new() -> Self {
        Self {
            regs: Registers::POST_BOOT,
            ime: false,
            halted: false,
            halt_bug: false,
            ime_delay: 0,
            m_cycle: 0,
            opcode: 0,
            cb_opcode: 0,
            z: 0,
            w: 0,
            mdr: 0,
            dispatch: None,
            fault: None,
            cycles: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
