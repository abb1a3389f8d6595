use super::{Bus, Cpu};

/// In-flight interrupt dispatch: a five machine-cycle pseudo `CALL`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Dispatch {
    /// 1..=5.
    cycle: u8,
    vector: u16,
}

impl Cpu {
    /// Enabled and requested interrupt lines (IE & IF).
    #[inline]
    pub(super) fn pending_interrupts(&mut self, bus: &mut dyn Bus) -> u8 {
        bus.interrupt_enable() & bus.interrupt_flags() & 0x1F
    }

    /// Apply a pending `EI` at an instruction boundary. `EI` arms a delay of
    /// two boundaries so the instruction after it runs with IME still clear.
    #[inline]
    pub(super) fn tick_ime_delay(&mut self) {
        if self.ime_delay > 0 {
            self.ime_delay -= 1;
            if self.ime_delay == 0 {
                self.ime = true;
            }
        }
    }

    /// First dispatch cycle: pick the highest-priority line (lowest bit),
    /// acknowledge it and clear IME. An armed HALT bug (`EI; HALT` with a
    /// request pending) is consumed here and the pushed return address is
    /// the HALT itself.
    pub(super) fn begin_dispatch(&mut self, bus: &mut dyn Bus) {
        if self.halt_bug {
            self.halt_bug = false;
            self.regs.pc = self.regs.pc.wrapping_sub(1);
        }

        let pending = self.pending_interrupts(bus);
        let index = pending.trailing_zeros() as u16;
        let flags = bus.interrupt_flags();
        bus.set_interrupt_flags(flags & !(1 << index));

        self.ime = false;
        self.ime_delay = 0;
        self.dispatch = Some(Dispatch {
            cycle: 1,
            vector: 0x0040 + index * 8,
        });
    }

    /// Cycles 2..=5: idle, push PC high, push PC low, jump.
    pub(super) fn step_dispatch(&mut self, bus: &mut dyn Bus) {
        let Some(mut dispatch) = self.dispatch else {
            return;
        };
        dispatch.cycle += 1;
        match dispatch.cycle {
            2 => {}
            3 => {
                let [hi, _] = self.regs.pc.to_be_bytes();
                self.push_byte(bus, hi);
            }
            4 => {
                let [_, lo] = self.regs.pc.to_be_bytes();
                self.push_byte(bus, lo);
            }
            _ => {
                self.regs.pc = dispatch.vector;
                self.dispatch = None;
                return;
            }
        }
        self.dispatch = Some(dispatch);
    }
}
