/// Timer / divider unit.
///
/// Follows the Mooneye GB state machine: a 16-bit system counter advancing
/// once per machine cycle, DIV exposing its upper byte, and TIMA counting
/// falling edges of the counter bit selected by TAC. An overflow leaves
/// TIMA at 0x00 for one machine cycle before TMA is reloaded and the
/// interrupt requested.
mod io;

pub(super) struct Timer {
    /// Hidden system counter; DIV is bits 13..6.
    internal_counter: u16,
    tima: u8,
    tma: u8,
    /// Lower three bits of TAC.
    tac: u8,
    /// TIMA overflowed on the last step; reload happens on the next one.
    overflow: bool,
    /// TIMA was reloaded from TMA on the last step.
    reloaded: bool,
}

impl Timer {
    /// DMG state at the hand-off to cartridge code; DIV reads 0xAB.
    pub(super) fn new() -> Self {
        Self {
            internal_counter: 0x2AC0,
            tima: 0x00,
            tma: 0x00,
            tac: 0x00,
            overflow: false,
            reloaded: false,
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// Counter bit feeding TIMA for the current TAC clock select:
    /// 00 → bit 7, 01 → bit 1, 10 → bit 3, 11 → bit 5.
    #[inline]
    fn counter_bit(&self) -> bool {
        let bit = match self.tac & 0x03 {
            0x00 => 7,
            0x01 => 1,
            0x02 => 3,
            _ => 5,
        };
        self.internal_counter & (1 << bit) != 0
    }

    /// The AND of the enable bit and the selected counter bit, whose
    /// falling edge clocks TIMA.
    #[inline]
    fn input(&self) -> bool {
        self.enabled() && self.counter_bit()
    }

    fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        if overflow {
            self.overflow = true;
        }
    }

    /// Advance one machine cycle. Returns `true` when the timer interrupt
    /// should be requested.
    pub(super) fn step(&mut self) -> bool {
        self.reloaded = false;
        let mut irq = false;
        if self.overflow {
            self.overflow = false;
            self.reloaded = true;
            self.tima = self.tma;
            irq = true;
        }

        let before = self.input();
        self.internal_counter = self.internal_counter.wrapping_add(1);
        if before && !self.input() {
            self.increment_tima();
        }
        irq
    }
}

