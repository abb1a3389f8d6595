use crate::cpu::{Cpu, Registers};
use crate::error::Result;
use crate::FrameBuffer;

use super::cartridge::CartridgeHeader;
use super::config::MachineConfig;
use super::interrupts::Interrupt;
use super::joypad::Button;
use super::ppu::Mode;
use super::{GameBoyBus, MCYCLES_PER_FRAME};

const LOG_TARGET: &str = "retroboy_dmg::gameboy";

/// `LD B,B`, used by test ROMs as a software breakpoint.
const SOFTWARE_BREAKPOINT: u8 = 0x40;

/// A DMG Game Boy: CPU, bus and the devices behind it, advanced one machine
/// cycle at a time.
pub struct GameBoy {
    pub(super) cpu: Cpu,
    pub(super) bus: GameBoyBus,
    config: MachineConfig,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new(&config),
            config,
        }
    }

    /// Insert a cartridge. The CPU is already at the post-boot state, so
    /// execution starts at 0x0100 on the next step.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.bus.load_cartridge(rom)
    }

    pub fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.bus.cartridge_header()
    }

    /// Advance one machine cycle: DMA, four PPU dots, the CPU, then timer
    /// and serial. Returns `true` if a frame completed during this cycle.
    ///
    /// An unimplemented opcode is fatal; the error is returned now and on
    /// every later call.
    pub fn step(&mut self) -> Result<bool> {
        self.bus.step_dma();

        let mut frame_ready = false;
        for _ in 0..4 {
            frame_ready |= self.bus.step_ppu_dot();
        }

        if self.config.trace_instructions && self.cpu.at_instruction_boundary() && !self.cpu.halted
        {
            let regs = &self.cpu.regs;
            sink_log!(
                self.config.sink,
                Trace,
                LOG_TARGET,
                "GB CPU: pc=0x{:04X} op=0x{:02X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} sp=0x{:04X} ly={} dot={}",
                regs.pc,
                self.bus.read_direct(regs.pc),
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
                regs.sp,
                self.bus.ppu.ly(),
                self.bus.ppu.dot()
            );
        }

        let already_faulted = self.cpu.fault().is_some();
        if let Err(err) = self.cpu.step(&mut self.bus) {
            if !already_faulted {
                sink_log!(self.config.sink, Error, LOG_TARGET, "GB CPU: {}", err);
            }
            return Err(err);
        }

        self.bus.step_peripherals();
        Ok(frame_ready)
    }

    /// Run until the PPU finishes a frame. With the LCD off no frame ever
    /// completes, so one frame's worth of cycles is run instead.
    pub fn step_frame(&mut self) -> Result<()> {
        let mut cycles = 0u32;
        loop {
            if self.step()? {
                return Ok(());
            }
            cycles += 1;
            if !self.bus.ppu.lcd_enabled() && cycles >= MCYCLES_PER_FRAME {
                return Ok(());
            }
        }
    }

    pub fn step_frames(&mut self, frames: u32) -> Result<()> {
        for _ in 0..frames {
            self.step_frame()?;
        }
        Ok(())
    }

    /// Run until the CPU has executed `LD B,B` (the test-suite screenshot
    /// convention). Returns `false` if `max_mcycles` pass first.
    pub fn step_until_software_breakpoint(&mut self, max_mcycles: u64) -> Result<bool> {
        for _ in 0..max_mcycles {
            let fetching = self.cpu.at_instruction_boundary() && !self.cpu.halted;
            self.step()?;
            if fetching
                && self.cpu.at_instruction_boundary()
                && self.cpu.current_opcode() == SOFTWARE_BREAKPOINT
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The last completed picture: 144 rows of 160 shades, 0 (lightest) to
    /// 3 (darkest).
    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.bus.ppu.frame_buffer()
    }

    /// Bytes the game has sent over the serial port since the last
    /// [`GameBoy::take_serial_output`]. Capture keeps every byte, so long
    /// runs should drain it.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial.output()
    }

    /// Drain the captured serial bytes.
    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.bus.serial.take_output()
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if self.bus.mmu.joypad.set(button, pressed) {
            self.bus.request_interrupt(Interrupt::Joypad);
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn registers(&self) -> &Registers {
        &self.cpu.regs
    }

    /// Read memory the way the CPU would outside of a DMA transfer, without
    /// side effects.
    pub fn peek(&self, addr: u16) -> u8 {
        self.bus.read_direct(addr)
    }

    pub fn ppu_mode(&self) -> Mode {
        self.bus.ppu.mode()
    }

    /// Current LY.
    pub fn scanline(&self) -> u8 {
        self.bus.ppu.ly()
    }
}
