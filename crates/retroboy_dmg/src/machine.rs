mod apu;
mod bus;
mod cartridge;
mod config;
mod dma;
mod gameboy;
mod interrupts;
mod joypad;
mod mmu;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use cartridge::{CartridgeHeader, MapperKind};
pub use config::MachineConfig;
pub use gameboy::GameBoy;
pub use interrupts::Interrupt;
pub use joypad::Button;
pub use ppu::Mode;

/// Machine cycles in one full frame (154 lines of 456 dots, 4 dots per cycle).
pub const MCYCLES_PER_FRAME: u32 = 17_556;

#[cfg(test)]
mod tests;
