use super::CartridgeHeader;

/// MBC1 mapper registers plus external RAM.
///
/// Bank registers are combined and then masked down to the physical ROM and
/// RAM sizes, so out-of-range banks wrap the way the real chip's unconnected
/// address lines make them wrap.
pub(super) struct Mbc1Cartridge {
    ram: Vec<u8>,
    rom_mask: usize,
    ram_mask: usize,
    ram_enable: bool,
    /// 5-bit ROM bank register; 0 is written as 1.
    bank1: u8,
    /// 2-bit upper ROM bank / RAM bank register.
    bank2: u8,
    /// Banking mode select (0 = simple, 1 = advanced).
    mode: u8,
}

impl Mbc1Cartridge {
    pub(super) fn new(header: &CartridgeHeader, rom_len: usize) -> Self {
        let declared = 0x8000usize << (header.rom_size_code & 0x0F).min(8);
        let rom_size = declared.max(rom_len.next_power_of_two()).max(0x8000);
        let ram_size = header.ram_size();
        Self {
            ram: vec![0xFF; ram_size],
            rom_mask: rom_size - 1,
            ram_mask: ram_size.saturating_sub(1),
            ram_enable: false,
            bank1: 1,
            bank2: 0,
            mode: 0,
        }
    }

    pub(super) fn rom_read(&self, rom: &[u8], addr: u16) -> u8 {
        let bank = match addr {
            0x0000..=0x3FFF if self.mode == 0 => 0,
            0x0000..=0x3FFF => usize::from(self.bank2) << 5,
            _ => (usize::from(self.bank2) << 5) | usize::from(self.bank1),
        };
        let index = ((bank << 14) | (addr as usize & 0x3FFF)) & self.rom_mask;
        rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => {
                self.bank1 = value & 0x1F;
                if self.bank1 == 0 {
                    self.bank1 = 1;
                }
            }
            0x4000..=0x5FFF => self.bank2 = value & 0x03,
            _ => self.mode = value & 0x01,
        }
    }

    fn ram_index(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable || self.ram.is_empty() {
            return None;
        }
        let bank = if self.mode == 1 {
            usize::from(self.bank2)
        } else {
            0
        };
        Some(((bank << 13) | (addr as usize & 0x1FFF)) & self.ram_mask)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        self.ram_index(addr)
            .and_then(|i| self.ram.get(i).copied())
            .unwrap_or(0xFF)
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Some(slot) = self.ram_index(addr).and_then(|i| self.ram.get_mut(i)) {
            *slot = value;
        }
    }
}
