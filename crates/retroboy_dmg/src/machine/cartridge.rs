mod mbc1;

use mbc1::Mbc1Cartridge;

use crate::error::{GbError, Result};
use crate::log_sink::SharedSink;

/// Smallest image that still holds the whole cartridge header.
const HEADER_END: usize = 0x0150;

/// Mapper chip selected from header byte 0x0147.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MapperKind {
    RomOnly,
    Mbc1,
}

/// Fields of the cartridge header the core cares about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(GbError::RomTooSmall { len: rom.len() });
        }
        let title = rom[0x0134..0x0144]
            .iter()
            .take_while(|b| **b != 0)
            .map(|b| *b as char)
            .collect::<String>();
        Ok(Self {
            title,
            cartridge_type: rom[0x0147],
            rom_size_code: rom[0x0148],
            ram_size_code: rom[0x0149],
        })
    }

    /// `None` for mapper types this core does not model.
    pub fn mapper(&self) -> Option<MapperKind> {
        match self.cartridge_type {
            0x00 => Some(MapperKind::RomOnly),
            0x01..=0x03 => Some(MapperKind::Mbc1),
            _ => None,
        }
    }

    /// External RAM size in bytes from header byte 0x0149.
    pub fn ram_size(&self) -> usize {
        match self.ram_size_code {
            0x02 => 0x2000,
            0x03 => 0x8000,
            0x04 => 0x20000,
            0x05 => 0x10000,
            _ => 0,
        }
    }
}

/// Mapper state, dispatched by enum as for the other memory components.
enum Mapper {
    RomOnly,
    Mbc1(Mbc1Cartridge),
}

pub(super) struct Cartridge {
    header: Option<CartridgeHeader>,
    rom: Vec<u8>,
    mapper: Mapper,
}

impl Cartridge {
    /// An empty slot: ROM reads return 0xFF.
    pub(super) fn empty() -> Self {
        Self {
            header: None,
            rom: Vec::new(),
            mapper: Mapper::RomOnly,
        }
    }

    pub(super) fn load(rom: &[u8], sink: &SharedSink) -> Result<Self> {
        let header = CartridgeHeader::parse(rom)?;
        let mapper = match header.mapper() {
            Some(MapperKind::RomOnly) => Mapper::RomOnly,
            Some(MapperKind::Mbc1) => Mapper::Mbc1(Mbc1Cartridge::new(&header, rom.len())),
            None => {
                sink_log!(
                    sink,
                    Warn,
                    "retroboy_dmg::cartridge",
                    "GB BUS: unsupported cartridge type 0x{:02X}, falling back to ROM only",
                    header.cartridge_type
                );
                Mapper::RomOnly
            }
        };
        sink_log!(
            sink,
            Info,
            "retroboy_dmg::cartridge",
            "GB BUS: loaded '{}' type=0x{:02X} rom_size=0x{:02X} ram_size=0x{:02X}",
            header.title,
            header.cartridge_type,
            header.rom_size_code,
            header.ram_size_code
        );
        Ok(Self {
            header: Some(header),
            rom: rom.to_vec(),
            mapper,
        })
    }

    pub(super) fn header(&self) -> Option<&CartridgeHeader> {
        self.header.as_ref()
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::RomOnly => self.rom.get(addr as usize).copied().unwrap_or(0xFF),
            Mapper::Mbc1(m) => m.rom_read(&self.rom, addr),
        }
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        if let Mapper::Mbc1(m) = &mut self.mapper {
            m.rom_write(addr, value);
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::RomOnly => 0xFF,
            Mapper::Mbc1(m) => m.ram_read(addr),
        }
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Mapper::Mbc1(m) = &mut self.mapper {
            m.ram_write(addr, value);
        }
    }
}
