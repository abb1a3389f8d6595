/// Sprites selectable on one line.
pub(super) const MAX_SPRITES: usize = 10;

/// OAM indices picked during OAM scan, in OAM order.
#[derive(Clone, Debug, Default)]
pub(super) struct SpriteBuffer {
    entries: [u8; MAX_SPRITES],
    len: usize,
}

impl SpriteBuffer {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn reset(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub(super) fn is_full(&self) -> bool {
        self.len == MAX_SPRITES
    }

    /// Ignored once ten entries are held.
    pub(super) fn push(&mut self, oam_index: u8) {
        if self.len < MAX_SPRITES {
            self.entries[self.len] = oam_index;
            self.len += 1;
        }
    }

    /// Remove entry `i`, keeping the order of the rest.
    pub(super) fn remove(&mut self, i: usize) -> Option<u8> {
        if i >= self.len {
            return None;
        }
        let entry = self.entries[i];
        self.entries.copy_within(i + 1..self.len, i);
        self.len -= 1;
        Some(entry)
    }

    pub(super) fn as_slice(&self) -> &[u8] {
        &self.entries[..self.len]
    }
}
