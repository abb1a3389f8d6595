/// The five DMG interrupt sources, in priority order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    /// Bit in IE/IF.
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Interrupt::VBlank => 0x01,
            Interrupt::LcdStat => 0x02,
            Interrupt::Timer => 0x04,
            Interrupt::Serial => 0x08,
            Interrupt::Joypad => 0x10,
        }
    }
}

/// Anything that can latch an interrupt request into IF.
pub(crate) trait InterruptSink {
    fn request(&mut self, interrupt: Interrupt);
}

/// IE (FFFF) and IF (FF0F).
#[derive(Clone, Debug, Default)]
pub(crate) struct InterruptRegisters {
    pub(crate) enable: u8,
    flags: u8,
}

impl InterruptRegisters {
    pub(crate) fn new() -> Self {
        Self {
            enable: 0x00,
            // VBlank is left requested by the boot ROM.
            flags: 0x01,
        }
    }

    /// IF as the CPU sees it; the upper three bits are unused and read 1.
    #[inline]
    pub(crate) fn read_flags(&self) -> u8 {
        self.flags | 0xE0
    }

    #[inline]
    pub(crate) fn write_flags(&mut self, value: u8) {
        self.flags = value & 0x1F;
    }
}

impl InterruptSink for InterruptRegisters {
    #[inline]
    fn request(&mut self, interrupt: Interrupt) {
        self.flags |= interrupt.bit();
    }
}
