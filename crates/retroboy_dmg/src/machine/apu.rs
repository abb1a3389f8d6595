/// Audio register file without synthesis.
///
/// Games poke these registers constantly, so they must read back the way
/// hardware does: unused and write-only bits read as 1 (per-register masks
/// below), and powering the APU off through NR52 clears everything except
/// wave RAM and keeps the registers read-only until it is powered back on.
pub(super) struct Apu {
    /// FF10..=FF3F.
    regs: [u8; 0x30],
}

const BASE: u16 = 0xFF10;
const NR52: u16 = 0xFF26;
const WAVE_RAM: u16 = 0xFF30;

/// OR masks applied on read, FF10..=FF2F. FF30..=FF3F (wave RAM) reads
/// back unmodified.
#[rustfmt::skip]
const READ_MASKS: [u8; 0x20] = [
    0x80, 0x3F, 0x00, 0xFF, 0xBF, // NR10-NR14
    0xFF, 0x3F, 0x00, 0xFF, 0xBF, // ----, NR21-NR24
    0x7F, 0xFF, 0x9F, 0xFF, 0xBF, // NR30-NR34
    0xFF, 0xFF, 0x00, 0x00, 0xBF, // ----, NR41-NR44
    0x00, 0x00, 0x70,             // NR50-NR52
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

/// Register contents left behind by the DMG boot ROM.
#[rustfmt::skip]
const POWER_ON: [u8; 0x17] = [
    0x80, 0xBF, 0xF3, 0xFF, 0xBF,
    0xFF, 0x3F, 0x00, 0xFF, 0xBF,
    0x7F, 0xFF, 0x9F, 0xFF, 0xBF,
    0xFF, 0xFF, 0x00, 0x00, 0xBF,
    0x77, 0xF3, 0xF1,
];

impl Apu {
    pub(super) fn new() -> Self {
        let mut regs = [0u8; 0x30];
        regs[..POWER_ON.len()].copy_from_slice(&POWER_ON);
        Self { regs }
    }

    #[inline]
    fn powered(&self) -> bool {
        self.regs[(NR52 - BASE) as usize] & 0x80 != 0
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        let index = (addr - BASE) as usize;
        match READ_MASKS.get(index) {
            Some(mask) => self.regs[index] | mask,
            None => self.regs[index],
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        let index = (addr - BASE) as usize;
        match addr {
            NR52 => self.write_nr52(value),
            WAVE_RAM..=0xFF3F => self.regs[index] = value,
            _ if self.powered() => self.regs[index] = value,
            _ => {}
        }
    }

    /// Only bit 7 is writable. Powering off clears NR10..=NR51 and the
    /// channel status bits.
    fn write_nr52(&mut self, value: u8) {
        let nr52 = (NR52 - BASE) as usize;
        if self.powered() && value & 0x80 == 0 {
            self.regs[..=nr52].fill(0);
        }
        self.regs[nr52] = (self.regs[nr52] & 0x7F) | (value & 0x80);
    }
}
