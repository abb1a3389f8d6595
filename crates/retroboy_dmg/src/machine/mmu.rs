use super::cartridge::Cartridge;
use super::interrupts::InterruptRegisters;
use super::joypad::Joypad;
use crate::log_sink::SharedSink;

const LOG_TARGET: &str = "retroboy_dmg::mmu";

/// Memory not owned by a dedicated device: cartridge, WRAM (plus echo),
/// HRAM, the interrupt registers, P1 and the I/O catch-all.
pub(super) struct Mmu {
    pub(super) cartridge: Cartridge,
    pub(super) interrupts: InterruptRegisters,
    pub(super) joypad: Joypad,
    wram: [u8; 0x2000],
    hram: [u8; 0x7F],
    sink: SharedSink,
}

impl Mmu {
    pub(super) fn new(sink: SharedSink) -> Self {
        Self {
            cartridge: Cartridge::empty(),
            interrupts: InterruptRegisters::new(),
            joypad: Joypad::new(),
            wram: [0; 0x2000],
            hram: [0; 0x7F],
            sink,
        }
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),
            0xA000..=0xBFFF => self.cartridge.ram_read(addr),
            0xC000..=0xFDFF => self.wram[(addr as usize) & 0x1FFF],
            0xFF00 => self.joypad.read(),
            0xFF0F => self.interrupts.read_flags(),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.interrupts.enable,
            _ => {
                sink_log!(
                    self.sink,
                    Debug,
                    LOG_TARGET,
                    "GB BUS: unmapped read 0x{:04X}",
                    addr
                );
                0xFF
            }
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_write(addr, value),
            0xA000..=0xBFFF => self.cartridge.ram_write(addr, value),
            0xC000..=0xFDFF => self.wram[(addr as usize) & 0x1FFF] = value,
            0xFF00 => self.joypad.write(value),
            0xFF0F => self.interrupts.write_flags(value),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.interrupts.enable = value,
            _ => {
                sink_log!(
                    self.sink,
                    Debug,
                    LOG_TARGET,
                    "GB BUS: unmapped write 0x{:04X} <- 0x{:02X}",
                    addr,
                    value
                );
            }
        }
    }
}
