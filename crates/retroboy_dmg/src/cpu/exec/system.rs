use super::super::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn nop(&mut self, _bus: &mut dyn Bus) -> bool {
        true
    }

    /// STOP is treated as a one-cycle no-op; the padding byte is not skipped.
    pub(in crate::cpu) fn stop(&mut self, _bus: &mut dyn Bus) -> bool {
        true
    }

    /// HALT. With IME clear and an interrupt already pending the core does
    /// not halt; instead the next opcode fetch fails to advance PC.
    pub(in crate::cpu) fn halt(&mut self, bus: &mut dyn Bus) -> bool {
        if !self.ime && self.pending_interrupts(bus) != 0 {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
        true
    }

    pub(in crate::cpu) fn di(&mut self, _bus: &mut dyn Bus) -> bool {
        self.ime = false;
        self.ime_delay = 0;
        true
    }

    pub(in crate::cpu) fn ei(&mut self, _bus: &mut dyn Bus) -> bool {
        if !self.ime && self.ime_delay == 0 {
            self.ime_delay = 2;
        }
        true
    }
}
