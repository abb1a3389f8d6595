/// Bytes copied per transfer; counted, not derived from the address range.
pub(super) const TRANSFER_LEN: u8 = 160;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DmaState {
    Idle,
    /// Written this cycle; becomes `Starting` on the next tick.
    Requested,
    /// Latches the source page and resets progress.
    Starting,
    Active,
}

/// OAM DMA controller (FF46).
///
/// Ticked once per machine cycle before the PPU. The controller only
/// sequences the transfer; the bus performs the actual read and OAM write
/// so that the VRAM stall rule can see the PPU mode.
pub(super) struct Dma {
    state: DmaState,
    /// Last value written to FF46.
    register: u8,
    pending_page: u8,
    source: u16,
    progress: u8,
    /// Most recently copied byte; CPU reads see it while a transfer runs.
    current_byte: u8,
    /// A transfer is moving bytes. Stays set through the request delay of a
    /// pre-empting write so the old transfer keeps running until then.
    transferring: bool,
}

impl Dma {
    pub(super) fn new() -> Self {
        Self {
            state: DmaState::Idle,
            register: 0xFF,
            pending_page: 0,
            source: 0,
            progress: 0,
            current_byte: 0xFF,
            transferring: false,
        }
    }

    #[inline]
    pub(super) fn register(&self) -> u8 {
        self.register
    }

    /// Arm a transfer from `page << 8`, whatever the current state.
    pub(super) fn request(&mut self, page: u8) {
        self.register = page;
        self.pending_page = page;
        self.state = DmaState::Requested;
    }

    /// Advance the state machine. Returns the source address to copy from
    /// this cycle, if any; the caller either completes it with
    /// [`Dma::commit`] or skips it (stall).
    pub(super) fn step(&mut self) -> Option<u16> {
        match self.state {
            DmaState::Idle => None,
            DmaState::Requested => {
                self.state = DmaState::Starting;
                self.transfer_address()
            }
            DmaState::Starting => {
                self.source = u16::from(self.pending_page) << 8;
                self.progress = 0;
                self.transferring = true;
                self.state = DmaState::Active;
                None
            }
            DmaState::Active => self.transfer_address(),
        }
    }

    fn transfer_address(&self) -> Option<u16> {
        self.transferring
            .then(|| self.source.wrapping_add(u16::from(self.progress)))
    }

    /// Record the byte copied this cycle. Returns the OAM offset it goes to
    /// and whether the transfer just finished.
    pub(super) fn commit(&mut self, byte: u8) -> (u8, bool) {
        let offset = self.progress;
        self.current_byte = byte;
        self.progress += 1;
        let finished = self.progress >= TRANSFER_LEN;
        if finished {
            self.transferring = false;
            if self.state == DmaState::Active {
                self.state = DmaState::Idle;
            }
        }
        (offset, finished)
    }

    /// Bytes are moving; CPU reads outside WRAM/HRAM are redirected.
    #[inline]
    pub(super) fn is_active(&self) -> bool {
        self.transferring
    }

    /// The source bus is held (first byte already fetched).
    #[inline]
    pub(super) fn bus_contended(&self) -> bool {
        self.transferring && self.progress > 0
    }

    #[inline]
    pub(super) fn current_byte(&self) -> u8 {
        self.current_byte
    }

    #[inline]
    pub(super) fn source_address(&self) -> u16 {
        self.source.wrapping_add(u16::from(self.progress))
    }
}
