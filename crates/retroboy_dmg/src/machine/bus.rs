//! System bus: routes CPU and DMA accesses to the owning device and applies
//! the PPU mode locks and OAM DMA conflicts on top of that routing.

mod contention;
mod routing;

use super::apu::Apu;
use super::cartridge::{Cartridge, CartridgeHeader};
use super::config::MachineConfig;
use super::dma::Dma;
use super::interrupts::{Interrupt, InterruptSink};
use super::mmu::Mmu;
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;
use crate::cpu::Bus;
use crate::error::Result;
use crate::log_sink::SharedSink;

const LOG_TARGET: &str = "retroboy_dmg::bus";

pub(crate) struct GameBoyBus {
    pub(super) mmu: Mmu,
    pub(super) ppu: Ppu,
    pub(super) dma: Dma,
    pub(super) timer: Timer,
    pub(super) serial: Serial,
    apu: Apu,
    sink: SharedSink,
}

impl GameBoyBus {
    pub(super) fn new(config: &MachineConfig) -> Self {
        Self {
            mmu: Mmu::new(config.sink.clone()),
            ppu: Ppu::new(config.sink.clone()),
            dma: Dma::new(),
            timer: Timer::new(),
            serial: Serial::new(config.capture_serial),
            apu: Apu::new(),
            sink: config.sink.clone(),
        }
    }

    pub(super) fn load_cartridge(&mut self, rom: &[u8]) -> Result<()> {
        self.mmu.cartridge = Cartridge::load(rom, &self.sink)?;
        Ok(())
    }

    pub(super) fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.mmu.cartridge.header()
    }

    /// One PPU dot. Returns `true` when a frame has just completed.
    #[inline]
    pub(super) fn step_ppu_dot(&mut self) -> bool {
        self.ppu.step(&mut self.mmu.interrupts)
    }

    /// Timer and serial, once per machine cycle after the CPU.
    pub(super) fn step_peripherals(&mut self) {
        if self.timer.step() {
            self.mmu.interrupts.request(Interrupt::Timer);
        }
        if self.serial.step() {
            self.mmu.interrupts.request(Interrupt::Serial);
        }
    }

    #[inline]
    pub(super) fn request_interrupt(&mut self, interrupt: Interrupt) {
        self.mmu.interrupts.request(interrupt);
    }
}

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }

    // Interrupt logic has its own wires to IE/IF; DMA never redirects it.
    fn interrupt_enable(&mut self) -> u8 {
        self.mmu.interrupts.enable
    }

    fn interrupt_flags(&mut self) -> u8 {
        self.mmu.interrupts.read_flags()
    }

    fn set_interrupt_flags(&mut self, value: u8) {
        self.mmu.interrupts.write_flags(value);
    }
}
