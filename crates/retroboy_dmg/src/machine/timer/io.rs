use super::Timer;

impl Timer {
    pub(in super::super) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => (self.internal_counter >> 6) as u8,
            0xFF05 => self.tima,
            0xFF06 => self.tma,
            _ => self.tac | 0xF8,
        }
    }

    pub(in super::super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF04 => self.write_div(),
            0xFF05 => self.write_tima(value),
            0xFF06 => self.write_tma(value),
            _ => self.write_tac(value),
        }
    }

    /// Any write clears the system counter. If the selected bit was high
    /// this is a falling edge and TIMA ticks once.
    fn write_div(&mut self) {
        let before = self.input();
        self.internal_counter = 0;
        if before {
            self.increment_tima();
        }
    }

    /// A write while the reload is pending cancels it (no reload, no
    /// interrupt). On the reload cycle itself the write is lost and TIMA
    /// keeps the TMA value.
    fn write_tima(&mut self, value: u8) {
        if self.reloaded {
            return;
        }
        self.overflow = false;
        self.tima = value;
    }

    /// On the reload cycle the new TMA value is also copied into TIMA.
    fn write_tma(&mut self, value: u8) {
        self.tma = value;
        if self.reloaded {
            self.tima = value;
        }
    }

    /// Disabling the timer or switching the clock select while the input
    /// is high is a falling edge too.
    fn write_tac(&mut self, value: u8) {
        let before = self.input();
        self.tac = value & 0x07;
        if before && !self.input() {
            self.increment_tima();
        }
    }
}
