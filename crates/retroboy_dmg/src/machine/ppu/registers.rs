use bitflags::bitflags;

use super::{Mode, Ppu, LOG_TARGET};

bitflags! {
    /// LCDC (FF40).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub(super) struct Lcdc: u8 {
        const LCD_ENABLE = 0x80;
        /// Window tile map at 0x9C00 instead of 0x9800.
        const WINDOW_MAP = 0x40;
        const WINDOW_ENABLE = 0x20;
        /// BG/window tile data at 0x8000 (unsigned) instead of 0x8800.
        const TILE_DATA = 0x10;
        const BG_MAP = 0x08;
        /// 8x16 sprites.
        const OBJ_SIZE = 0x04;
        const OBJ_ENABLE = 0x02;
        const BG_ENABLE = 0x01;
    }
}

bitflags! {
    /// Byte 3 of an OAM entry.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub(super) struct SpriteAttributes: u8 {
        /// BG colours 1-3 are drawn over this sprite.
        const BG_PRIORITY = 0x80;
        const FLIP_Y = 0x40;
        const FLIP_X = 0x20;
        /// OBP1 instead of OBP0.
        const PALETTE = 0x10;
    }
}

impl Ppu {
    pub(in crate::machine) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => self.stat | 0x80,
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    pub(in crate::machine) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF40 => self.write_lcdc(value),
            0xFF41 => self.stat = (self.stat & 0x87) | (value & 0x78),
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.lyc = value;
                self.update_lyc_flag();
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }

    fn write_lcdc(&mut self, value: u8) {
        let was_enabled = self.lcd_enabled();
        self.lcdc = Lcdc::from_bits_retain(value);
        let enabled = self.lcd_enabled();

        if was_enabled == enabled {
            return;
        }
        if enabled {
            self.set_mode(Mode::OamScan);
            sink_log!(self.sink, Debug, LOG_TARGET, "GB PPU: LCD on");
        } else {
            // STAT reports HBlank while the LCD is off.
            self.ly = 0;
            self.dot = 0;
            self.set_mode(Mode::HBlank);
            sink_log!(self.sink, Debug, LOG_TARGET, "GB PPU: LCD off");
        }
        self.update_lyc_flag();
        self.begin_frame();
        self.stat_line = false;
        self.sprites.reset();
    }

    /// VRAM as seen from the CPU: 0xFF while locked.
    pub(in crate::machine) fn read_vram(&self, addr: u16) -> u8 {
        if self.vram_accessible() {
            self.vram[(addr & 0x1FFF) as usize]
        } else {
            0xFF
        }
    }

    pub(in crate::machine) fn write_vram(&mut self, addr: u16, value: u8) {
        if self.vram_accessible() {
            self.vram[(addr & 0x1FFF) as usize] = value;
        }
    }

    /// Unlocked VRAM access for DMA.
    #[inline]
    pub(in crate::machine) fn vram_direct(&self, addr: u16) -> u8 {
        self.vram[(addr & 0x1FFF) as usize]
    }

    pub(in crate::machine) fn read_oam(&self, addr: u16) -> u8 {
        if self.oam_accessible() {
            self.oam[(addr - 0xFE00) as usize]
        } else {
            0xFF
        }
    }

    pub(in crate::machine) fn write_oam(&mut self, addr: u16, value: u8) {
        if self.oam_accessible() {
            self.oam[(addr - 0xFE00) as usize] = value;
        }
    }

    /// DMA destination write; ignores the mode lock.
    #[inline]
    pub(in crate::machine) fn write_oam_direct(&mut self, offset: u8, value: u8) {
        if let Some(slot) = self.oam.get_mut(offset as usize) {
            *slot = value;
        }
    }

    #[cfg(test)]
    pub(in crate::machine) fn oam_direct(&self, offset: u8) -> u8 {
        self.oam[offset as usize]
    }
}
