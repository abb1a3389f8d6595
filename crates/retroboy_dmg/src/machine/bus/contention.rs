use super::super::ppu::Mode;
use super::{GameBoyBus, LOG_TARGET};

/// Physical buses the DMA can hold. Work RAM sits on the main bus with the
/// cartridge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BusGroup {
    Main,
    Video,
    Oam,
}

impl BusGroup {
    fn of(addr: u16) -> Self {
        match addr {
            0x8000..=0x9FFF => BusGroup::Video,
            0xFE00..=0xFE9F => BusGroup::Oam,
            _ => BusGroup::Main,
        }
    }
}

/// Reads the CPU can still make while DMA is copying.
#[inline]
fn reachable_during_dma(addr: u16) -> bool {
    matches!(addr, 0xC000..=0xFDFF | 0xFF80..=0xFFFE | 0xFF46)
}

impl GameBoyBus {
    /// CPU read. While DMA is copying, everything but work RAM, HRAM and
    /// FF46 returns the byte in flight.
    pub(in crate::machine) fn read(&mut self, addr: u16) -> u8 {
        if self.dma.is_active() && !reachable_during_dma(addr) {
            return self.dma.current_byte();
        }
        self.read_direct(addr)
    }

    /// CPU write. FF46 always reaches the controller; OAM writes and writes
    /// onto the bus the DMA is reading from are lost while it runs.
    pub(in crate::machine) fn write(&mut self, addr: u16, value: u8) {
        if addr == 0xFF46 {
            sink_log!(
                self.sink,
                Debug,
                LOG_TARGET,
                "GB DMA: requested from 0x{:02X}00",
                value
            );
            self.dma.request(value);
            return;
        }

        if self.dma.is_active() && self.write_blocked_by_dma(addr) {
            sink_log!(
                self.sink,
                Debug,
                LOG_TARGET,
                "GB BUS: write 0x{:04X} <- 0x{:02X} dropped during DMA",
                addr,
                value
            );
            return;
        }
        self.write_direct(addr, value);
    }

    fn write_blocked_by_dma(&self, addr: u16) -> bool {
        if BusGroup::of(addr) == BusGroup::Oam {
            return true;
        }
        addr < 0xFE00
            && self.dma.bus_contended()
            && BusGroup::of(addr) == BusGroup::of(self.dma.source_address())
    }

    /// One machine cycle of OAM DMA. A VRAM source stalls while the PPU is
    /// drawing; the byte is retried on the next cycle.
    pub(in crate::machine) fn step_dma(&mut self) {
        let Some(source) = self.dma.step() else {
            return;
        };
        if BusGroup::of(source) == BusGroup::Video && self.ppu.mode() == Mode::Drawing {
            sink_log!(
                self.sink,
                Trace,
                LOG_TARGET,
                "GB DMA: stalled on VRAM source 0x{:04X}",
                source
            );
            return;
        }

        let byte = self.read_dma_source(source);
        let (offset, finished) = self.dma.commit(byte);
        self.ppu.write_oam_direct(offset, byte);

        if offset == 0 {
            sink_log!(
                self.sink,
                Debug,
                LOG_TARGET,
                "GB DMA: transfer from 0x{:04X} started",
                source
            );
        }
        if finished {
            sink_log!(self.sink, Debug, LOG_TARGET, "GB DMA: transfer finished");
        }
    }
}
