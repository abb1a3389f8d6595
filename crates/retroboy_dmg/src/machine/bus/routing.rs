use super::GameBoyBus;

impl GameBoyBus {
    /// Address decode without DMA conflicts. VRAM and OAM still honour the
    /// PPU mode locks.
    pub(in crate::machine) fn read_direct(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0x9FFF => self.ppu.read_vram(addr),
            0xFE00..=0xFE9F => self.ppu.read_oam(addr),
            0xFEA0..=0xFEFF => {
                if self.ppu.oam_accessible() {
                    0x00
                } else {
                    0xFF
                }
            }
            0xFF01..=0xFF02 => self.serial.read(addr),
            0xFF04..=0xFF07 => self.timer.read(addr),
            0xFF10..=0xFF3F => self.apu.read(addr),
            0xFF46 => self.dma.register(),
            0xFF40..=0xFF4B => self.ppu.read_register(addr),
            _ => self.mmu.read(addr),
        }
    }

    pub(in crate::machine) fn write_direct(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0x9FFF => self.ppu.write_vram(addr, value),
            0xFE00..=0xFE9F => self.ppu.write_oam(addr, value),
            0xFEA0..=0xFEFF => {}
            0xFF01..=0xFF02 => self.serial.write(addr, value),
            0xFF04..=0xFF07 => self.timer.write(addr, value),
            0xFF10..=0xFF3F => self.apu.write(addr, value),
            0xFF46 => self.dma.request(value),
            0xFF40..=0xFF4B => self.ppu.write_register(addr, value),
            _ => self.mmu.write(addr, value),
        }
    }

    /// Where a DMA source address actually reads from. Pages 0xE0..=0xFF
    /// alias work RAM.
    pub(super) fn read_dma_source(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0x9FFF => self.ppu.vram_direct(addr),
            0xE000..=0xFFFF => self.mmu.read(addr - 0x2000),
            _ => self.mmu.read(addr),
        }
    }
}
