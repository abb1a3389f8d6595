//! Dot-accurate DMG picture processing unit.
//!
//! One call to [`Ppu::step`] is one dot (T-cycle). Each visible line runs
//! an 80-dot OAM scan, then pixel transfer driven by the background/sprite
//! fetcher and its two FIFOs, then HBlank until dot 456. Lines 144..=153
//! are VBlank.

mod fetcher;
mod fifo;
mod registers;
mod sprite_buffer;

use fetcher::Fetcher;
use registers::Lcdc;
use sprite_buffer::SpriteBuffer;

use super::interrupts::{Interrupt, InterruptSink};
use crate::log_sink::SharedSink;
use crate::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

const LOG_TARGET: &str = "retroboy_dmg::ppu";

pub(super) const DOTS_PER_LINE: u16 = 456;
const OAM_SCAN_DOTS: u16 = 80;
const VBLANK_START_LINE: u8 = SCREEN_HEIGHT as u8;
const LINES_PER_FRAME: u8 = 154;

/// PPU mode as reported in STAT bits 1..0.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Drawing = 3,
}

pub(super) struct Ppu {
    vram: [u8; 0x2000],
    /// 40 entries of Y, X, tile, attributes.
    oam: [u8; 0xA0],
    lcdc: Lcdc,
    /// Writable interrupt-select bits 6..3 plus LYC flag and mode.
    stat: u8,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    wy: u8,
    wx: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    mode: Mode,
    /// Dot within the current line, 0..456.
    dot: u16,
    /// Previous level of the ORed STAT interrupt sources.
    stat_line: bool,
    sprites: SpriteBuffer,
    fetcher: Fetcher,
    frame: Box<FrameBuffer>,
    sink: SharedSink,
}

impl Ppu {
    /// DMG state at the hand-off to cartridge code.
    pub(super) fn new(sink: SharedSink) -> Self {
        Self {
            vram: [0; 0x2000],
            oam: [0; 0xA0],
            lcdc: Lcdc::from_bits_retain(0x91),
            stat: 0x85,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            wy: 0,
            wx: 0,
            bgp: 0xFC,
            obp0: 0xFF,
            obp1: 0xFF,
            mode: Mode::OamScan,
            dot: 0,
            stat_line: false,
            sprites: SpriteBuffer::new(),
            fetcher: Fetcher::new(),
            frame: Box::new([[0; SCREEN_WIDTH]; SCREEN_HEIGHT]),
            sink,
        }
    }

    #[inline]
    pub(super) fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub(super) fn ly(&self) -> u8 {
        self.ly
    }

    #[inline]
    pub(super) fn dot(&self) -> u16 {
        self.dot
    }

    #[inline]
    pub(super) fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(Lcdc::LCD_ENABLE)
    }

    #[inline]
    pub(super) fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    /// CPU may touch VRAM outside of pixel transfer.
    #[inline]
    pub(super) fn vram_accessible(&self) -> bool {
        self.mode != Mode::Drawing
    }

    /// CPU may touch OAM outside of OAM scan and pixel transfer.
    #[inline]
    pub(super) fn oam_accessible(&self) -> bool {
        !matches!(self.mode, Mode::OamScan | Mode::Drawing)
    }

    /// Advance one dot. Returns `true` on the dot that enters VBlank.
    pub(super) fn step(&mut self, irq: &mut impl InterruptSink) -> bool {
        if !self.lcd_enabled() {
            return false;
        }

        self.update_stat_line(irq);

        if self.ly < VBLANK_START_LINE {
            if self.dot == 0 {
                self.set_mode(Mode::OamScan);
                self.sprites.reset();
            } else if self.dot == OAM_SCAN_DOTS {
                self.set_mode(Mode::Drawing);
                self.prepare_for_scanline();
            }

            match self.mode {
                Mode::OamScan => {
                    if self.dot % 2 == 0 {
                        self.scan_oam_entry((self.dot / 2) as usize);
                    }
                }
                Mode::Drawing => self.fetcher_step(),
                Mode::HBlank | Mode::VBlank => {}
            }
        }

        self.dot += 1;
        if self.dot < DOTS_PER_LINE {
            return false;
        }
        self.end_of_line(irq)
    }

    /// Mode 2: one OAM entry every two dots, keeping at most ten that
    /// overlap the current line.
    fn scan_oam_entry(&mut self, index: usize) {
        if self.sprites.is_full() {
            return;
        }
        let base = index * 4;
        let y = u16::from(self.oam[base]);
        let x = self.oam[base + 1];
        let line = u16::from(self.ly) + 16;
        if line >= y && line < y + self.sprite_height() && x > 0 {
            self.sprites.push(index as u8);
        }
    }

    #[inline]
    fn sprite_height(&self) -> u16 {
        if self.lcdc.contains(Lcdc::OBJ_SIZE) {
            16
        } else {
            8
        }
    }

    fn end_of_line(&mut self, irq: &mut impl InterruptSink) -> bool {
        let mut frame_ready = false;
        self.dot = 0;
        self.ly += 1;

        self.fetcher.end_of_line();
        if self.wy == self.ly {
            self.fetcher.wy_triggered = true;
        }

        if self.ly == VBLANK_START_LINE {
            frame_ready = true;
            self.set_mode(Mode::VBlank);
            irq.request(Interrupt::VBlank);
            // Entering VBlank also fires STAT when the mode 2 source is
            // selected.
            if self.stat & 0x20 != 0 {
                irq.request(Interrupt::LcdStat);
            }
            sink_log!(self.sink, Debug, LOG_TARGET, "GB PPU: VBlank, frame ready");
        } else if self.ly == LINES_PER_FRAME {
            self.ly = 0;
            self.begin_frame();
        }

        self.update_lyc_flag();
        frame_ready
    }

    /// Window row counter restarts and WY is compared against line 0.
    fn begin_frame(&mut self) {
        self.fetcher.start_frame();
        if self.wy == self.ly {
            self.fetcher.wy_triggered = true;
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.stat = (self.stat & 0xFC) | mode as u8;
    }

    /// STAT fires on a rising edge of the OR of all selected sources.
    fn update_stat_line(&mut self, irq: &mut impl InterruptSink) {
        let line = match self.mode {
            Mode::HBlank => self.stat & 0x08 != 0,
            Mode::VBlank => self.stat & 0x10 != 0,
            Mode::OamScan => self.stat & 0x20 != 0,
            Mode::Drawing => false,
        } || (self.stat & 0x44 == 0x44);

        if line && !self.stat_line {
            irq.request(Interrupt::LcdStat);
            sink_log!(
                self.sink,
                Debug,
                LOG_TARGET,
                "GB PPU: STAT interrupt ly={} mode={:?}",
                self.ly,
                self.mode
            );
        }
        self.stat_line = line;
    }

    fn update_lyc_flag(&mut self) {
        if self.ly == self.lyc {
            self.stat |= 0x04;
        } else {
            self.stat &= !0x04;
        }
    }
}
