use super::{instruction, Bus, Cpu};
use crate::error::{GbError, Result};

impl Cpu {
    /// Advance the CPU by exactly one machine cycle.
    ///
    /// At an instruction boundary this either starts an interrupt dispatch
    /// or fetches the next opcode (cycle 1 of every instruction); otherwise
    /// it resumes the current handler on its next cycle. An opcode without a
    /// handler locks the core and is returned on this and every later call.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        self.step_cycle(bus)
    }

    fn step_cycle(&mut self, bus: &mut dyn Bus) -> Result<()> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        self.cycles = self.cycles.wrapping_add(1);

        if self.dispatch.is_some() {
            self.step_dispatch(bus);
            return Ok(());
        }

        if self.halted {
            // Any enabled request wakes the core regardless of IME; the wake
            // itself takes this cycle.
            if self.pending_interrupts(bus) != 0 {
                self.halted = false;
            }
            return Ok(());
        }

        if self.m_cycle == 0 {
            self.tick_ime_delay();
            if self.ime && self.pending_interrupts(bus) != 0 {
                self.begin_dispatch(bus);
                return Ok(());
            }

            let pc = self.regs.pc;
            self.opcode = self.fetch_opcode(bus);
            if instruction(self.opcode).is_none() {
                let fault = GbError::UnimplementedOpcode {
                    opcode: self.opcode,
                    pc,
                };
                self.fault = Some(fault.clone());
                return Err(fault);
            }
        }

        self.m_cycle += 1;
        let Some(entry) = instruction(self.opcode) else {
            return Ok(());
        };
        if (entry.step)(self, bus) {
            self.m_cycle = 0;
        }
        Ok(())
    }

    /// Opcode fetch. With the HALT bug armed, PC fails to advance exactly
    /// once, so the byte after HALT is read twice.
    #[inline]
    fn fetch_opcode(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    /// Run the current instruction (or dispatch) to completion. Handy for
    /// harnesses that think in instructions rather than cycles; returns the
    /// number of machine cycles consumed.
    pub fn step_instruction<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let mut cycles = 0;
        loop {
            self.step(bus)?;
            cycles += 1;
            if self.at_instruction_boundary() || self.halted {
                return Ok(cycles);
            }
        }
    }
}
