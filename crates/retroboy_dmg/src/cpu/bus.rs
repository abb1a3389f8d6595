/// The CPU's view of the system bus.
///
/// Every call is one CPU-visible access within the current machine cycle; the
/// bus decides what the access actually observes (locked VRAM, DMA contention,
/// open bus). The interrupt helpers default to plain accesses of IE/IF, but a
/// system bus should route them around DMA contention: the interrupt logic is
/// not a memory access on hardware.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Raw IE (0xFFFF).
    fn interrupt_enable(&mut self) -> u8 {
        self.read8(0xFFFF)
    }

    /// Raw IF (0xFF0F), lower five bits significant.
    fn interrupt_flags(&mut self) -> u8 {
        self.read8(0xFF0F)
    }

    fn set_interrupt_flags(&mut self, value: u8) {
        self.write8(0xFF0F, value)
    }
}
