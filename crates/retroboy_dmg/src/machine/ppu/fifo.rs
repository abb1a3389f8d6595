/// Capacity of both pixel FIFOs.
pub(super) const FIFO_SIZE: usize = 8;
const MASK: usize = FIFO_SIZE - 1;

/// One pixel waiting to be shifted out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct Pixel {
    /// 2-bit colour index before palette lookup.
    pub(super) color: u8,
    /// Sprites only: OBP1 selected.
    pub(super) obp1: bool,
    /// Sprites only: BG colours 1-3 win over this pixel.
    pub(super) bg_priority: bool,
}

/// Fixed eight-slot ring buffer. Slot identity matters: sprite pixels are
/// merged into occupied slots in place, so this is not a growable queue.
#[derive(Clone, Debug, Default)]
pub(super) struct PixelFifo {
    slots: [Pixel; FIFO_SIZE],
    head: usize,
    tail: usize,
    len: usize,
}

impl PixelFifo {
    pub(super) fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(super) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `false` (and drops the pixel) when full.
    pub(super) fn push(&mut self, pixel: Pixel) -> bool {
        if self.len == FIFO_SIZE {
            return false;
        }
        self.slots[self.tail] = pixel;
        self.tail = (self.tail + 1) & MASK;
        self.len += 1;
        true
    }

    pub(super) fn pop(&mut self) -> Option<Pixel> {
        if self.len == 0 {
            return None;
        }
        let pixel = self.slots[self.head];
        self.head = (self.head + 1) & MASK;
        self.len -= 1;
        Some(pixel)
    }

    /// Mutable access to the `index`-th queued pixel (0 = next out).
    pub(super) fn get_mut(&mut self, index: usize) -> Option<&mut Pixel> {
        if index >= self.len {
            return None;
        }
        Some(&mut self.slots[(self.head + index) & MASK])
    }
}
