/// Machine cycles per serial transfer at the internal 8192 Hz clock.
const TRANSFER_MCYCLES: u16 = 128;

/// Serial port (SB/SC).
///
/// Only the internal-clock master side is modelled: nothing is connected,
/// so a transfer shifts in 0xFF. Bytes the game sends are kept in `output`
/// when capture is enabled; test ROMs report their results this way. The
/// buffer only grows until the owner drains it with [`Serial::take_output`].
pub(crate) struct Serial {
    sb: u8,
    sc: u8,
    remaining: u16,
    capture: bool,
    output: Vec<u8>,
}

impl Serial {
    pub(crate) fn new(capture: bool) -> Self {
        Self {
            sb: 0x00,
            sc: 0x00,
            remaining: 0,
            capture,
            output: Vec::new(),
        }
    }

    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF01 => self.sb,
            _ => self.sc | 0x7E,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF01 => self.sb = value,
            _ => {
                self.sc = value & 0x81;
                // Transfer start with the internal clock selected.
                if self.sc == 0x81 {
                    if self.capture {
                        self.output.push(self.sb);
                    }
                    self.remaining = TRANSFER_MCYCLES;
                } else {
                    self.remaining = 0;
                }
            }
        }
    }

    /// Advance one machine cycle. Returns `true` when a transfer completes
    /// and the serial interrupt should be requested.
    pub(crate) fn step(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining > 0 {
            return false;
        }
        self.sb = 0xFF;
        self.sc &= !0x80;
        true
    }

    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }

    pub(crate) fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}
