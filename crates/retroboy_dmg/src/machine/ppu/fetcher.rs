use super::fifo::{Pixel, PixelFifo, FIFO_SIZE};
use super::registers::{Lcdc, SpriteAttributes};
use super::{Mode, Ppu, LOG_TARGET};
use crate::SCREEN_WIDTH;

/// Dots each fetch step takes.
const STEP_DOTS: u8 = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum FetchState {
    Tile,
    DataLow,
    DataHigh,
    Push,
}

/// Pixel fetcher and FIFO state for mode 3.
///
/// The fetcher normally walks background (or window) tiles; a sprite whose
/// X is reached interrupts it, is fetched through the same states and is
/// merged into the sprite FIFO, after which the background fetch restarts.
#[derive(Clone, Debug)]
pub(super) struct Fetcher {
    state: FetchState,
    /// Dots spent in the current state.
    counter: u8,
    tile_number: u8,
    tile_low: u8,
    tile_high: u8,
    /// Tile column, relative to SCX/8 or to the window's left edge.
    tile_x: u8,
    /// SCX % 8 pixels thrown away at the start of the line.
    discard: u8,
    /// Dots the first pixels are held back for fine scrolling.
    scroll_penalty: u8,
    fetching_window: bool,
    /// Next LCD column to be written.
    x: u8,
    /// Window row, advanced only on lines that showed window pixels.
    window_line: u8,
    /// The first background fetch of a line restarts from the tile step.
    first_fetch: bool,
    line_had_window: bool,
    /// WY matched LY at some point this frame.
    pub(super) wy_triggered: bool,
    fetching_sprite: bool,
    sprite_index: u8,
    bg_fifo: PixelFifo,
    sprite_fifo: PixelFifo,
}

impl Fetcher {
    pub(super) fn new() -> Self {
        Self {
            state: FetchState::Tile,
            counter: 0,
            tile_number: 0,
            tile_low: 0,
            tile_high: 0,
            tile_x: 0,
            discard: 0,
            scroll_penalty: 0,
            fetching_window: false,
            x: 0,
            window_line: 0,
            first_fetch: true,
            line_had_window: false,
            wy_triggered: false,
            fetching_sprite: false,
            sprite_index: 0,
            bg_fifo: PixelFifo::default(),
            sprite_fifo: PixelFifo::default(),
        }
    }

    pub(super) fn end_of_line(&mut self) {
        if self.line_had_window {
            self.window_line = self.window_line.wrapping_add(1);
        }
        self.line_had_window = false;
    }

    pub(super) fn start_frame(&mut self) {
        self.window_line = 0;
        self.line_had_window = false;
        self.wy_triggered = false;
    }

    #[cfg(test)]
    pub(super) fn x(&self) -> u8 {
        self.x
    }

    #[cfg(test)]
    pub(super) fn window_line(&self) -> u8 {
        self.window_line
    }
}

impl Ppu {
    /// Reset the fetcher at the start of mode 3.
    pub(super) fn prepare_for_scanline(&mut self) {
        let f = &mut self.fetcher;
        f.state = FetchState::Tile;
        f.bg_fifo.reset();
        f.sprite_fifo.reset();
        f.first_fetch = true;
        f.fetching_sprite = false;
        f.fetching_window = false;
        f.x = 0;
        f.counter = 0;
        f.tile_x = 0;

        f.discard = self.scx % 8;
        f.scroll_penalty = match f.discard {
            0 => 0,
            1..=4 => 4,
            _ => 8,
        };
    }

    /// One dot of mode 3: shift a pixel out (unless a sprite fetch holds the
    /// pipeline) and then advance the fetcher.
    pub(super) fn fetcher_step(&mut self) {
        if !self.fetcher.fetching_sprite {
            self.push_pixel();
        }
        self.fetcher_tick();
    }

    fn fetcher_tick(&mut self) {
        if !self.fetcher.fetching_sprite && self.start_sprite_fetch() {
            return;
        }
        if self.start_window_fetch() {
            return;
        }

        self.fetcher.counter = self.fetcher.counter.saturating_add(1);
        if self.fetcher.counter < STEP_DOTS {
            return;
        }

        match self.fetcher.state {
            FetchState::Tile => {
                self.fetcher.counter = 0;
                self.fetcher.tile_number = self.fetch_tile_number();
                self.fetcher.state = FetchState::DataLow;
            }
            FetchState::DataLow => {
                self.fetcher.counter = 0;
                self.fetcher.tile_low = self.fetch_tile_data(0);
                self.fetcher.state = FetchState::DataHigh;
            }
            FetchState::DataHigh => {
                self.fetcher.counter = 0;
                self.fetcher.tile_high = self.fetch_tile_data(1);
                let f = &mut self.fetcher;
                if f.first_fetch {
                    f.first_fetch = false;
                    f.state = FetchState::Tile;
                } else {
                    f.state = FetchState::Push;
                }
            }
            FetchState::Push => {
                let pushed = if self.fetcher.fetching_sprite {
                    self.merge_sprite_row();
                    true
                } else {
                    self.push_background_row()
                };
                // Without a push the step repeats on the next dot.
                if pushed {
                    self.fetcher.state = FetchState::Tile;
                    self.fetcher.counter = 0;
                }
            }
        }
    }

    /// Interrupt the background fetch for the first selected sprite whose X
    /// has been reached. The sprite leaves the buffer.
    fn start_sprite_fetch(&mut self) -> bool {
        let reach = u16::from(self.fetcher.x) + 8;
        let hit = self
            .sprites
            .as_slice()
            .iter()
            .position(|&index| u16::from(self.oam[index as usize * 4 + 1]) <= reach);
        let Some(slot) = hit else {
            return false;
        };
        let Some(index) = self.sprites.remove(slot) else {
            return false;
        };

        let f = &mut self.fetcher;
        f.fetching_sprite = true;
        f.state = FetchState::Tile;
        f.sprite_index = index;
        f.counter = 0;
        f.tile_number = 0;
        f.tile_low = 0;
        f.tile_high = 0;
        true
    }

    /// Switch to window tiles once WY has matched this frame and the window
    /// left edge (WX - 7) is reached.
    fn start_window_fetch(&mut self) -> bool {
        let f = &self.fetcher;
        if f.fetching_window
            || !self.lcdc.contains(Lcdc::WINDOW_ENABLE)
            || !f.wy_triggered
            || u16::from(f.x) + 7 < u16::from(self.wx)
        {
            return false;
        }

        let f = &mut self.fetcher;
        f.state = FetchState::Tile;
        f.bg_fifo.reset();
        f.fetching_window = true;
        f.line_had_window = true;
        f.tile_x = 0;
        f.counter = 0;
        f.discard = 0;
        f.scroll_penalty = 0;
        true
    }

    fn fetch_tile_number(&self) -> u8 {
        let f = &self.fetcher;
        if f.fetching_sprite {
            return self.oam[f.sprite_index as usize * 4 + 2];
        }

        let (map, tile_y, tile_x) = if f.fetching_window {
            let map = if self.lcdc.contains(Lcdc::WINDOW_MAP) {
                0x1C00
            } else {
                0x1800
            };
            (map, f.window_line / 8, f.tile_x)
        } else {
            let map = if self.lcdc.contains(Lcdc::BG_MAP) {
                0x1C00
            } else {
                0x1800
            };
            let tile_y = self.ly.wrapping_add(self.scy) / 8;
            let tile_x = f.tile_x.wrapping_add(self.scx / 8) & 0x1F;
            (map, tile_y, tile_x)
        };
        let offset = (u16::from(tile_y) * 32 + u16::from(tile_x)) & 0x3FF;
        self.vram[(map + offset) as usize]
    }

    /// Low (`byte` = 0) or high (`byte` = 1) bitplane of the current row.
    fn fetch_tile_data(&self, byte: u16) -> u8 {
        let f = &self.fetcher;
        let addr = if f.fetching_sprite {
            let base = f.sprite_index as usize * 4;
            let y = self.oam[base];
            let attrs = SpriteAttributes::from_bits_retain(self.oam[base + 3]);
            let mut tile = f.tile_number;
            let mut row = self.ly.wrapping_add(16).wrapping_sub(y);

            if self.lcdc.contains(Lcdc::OBJ_SIZE) {
                if attrs.contains(SpriteAttributes::FLIP_Y) {
                    row = 15u8.wrapping_sub(row);
                }
                if row < 8 {
                    tile &= 0xFE;
                } else {
                    tile |= 0x01;
                    row -= 8;
                }
            } else {
                // A tall sprite picked during OAM scan wraps inside 8x8.
                row &= 0x07;
                if attrs.contains(SpriteAttributes::FLIP_Y) {
                    row = 7 - row;
                }
            }
            // Sprites always use the unsigned 0x8000 addressing.
            u16::from(tile) * 16 + u16::from(row & 0x0F) * 2
        } else {
            let base = if self.lcdc.contains(Lcdc::TILE_DATA) {
                u16::from(f.tile_number) * 16
            } else {
                (0x1000i32 + i32::from(f.tile_number as i8) * 16) as u16
            };
            let row = if f.fetching_window {
                f.window_line % 8
            } else {
                self.ly.wrapping_add(self.scy) % 8
            };
            base + u16::from(row) * 2
        };
        self.vram[((addr + byte) & 0x1FFF) as usize]
    }

    /// Push eight background pixels, but only into an empty FIFO.
    fn push_background_row(&mut self) -> bool {
        let f = &mut self.fetcher;
        if !f.bg_fifo.is_empty() {
            return false;
        }
        for bit in (0..8).rev() {
            let color = (((f.tile_high >> bit) & 1) << 1) | ((f.tile_low >> bit) & 1);
            f.bg_fifo.push(Pixel {
                color,
                ..Pixel::default()
            });
        }
        f.tile_x = f.tile_x.wrapping_add(1);
        true
    }

    /// Merge the fetched sprite row into the sprite FIFO. Off-screen pixels
    /// (X < 8) are skipped; an occupied slot is only replaced when it is
    /// transparent and the new pixel is not.
    fn merge_sprite_row(&mut self) {
        let base = self.fetcher.sprite_index as usize * 4;
        let sprite_x = self.oam[base + 1];
        let attrs = SpriteAttributes::from_bits_retain(self.oam[base + 3]);
        let flip_x = attrs.contains(SpriteAttributes::FLIP_X);

        let f = &mut self.fetcher;
        let mut row = [Pixel::default(); FIFO_SIZE];
        for (i, pixel) in row.iter_mut().enumerate() {
            let bit = if flip_x { i } else { 7 - i };
            *pixel = Pixel {
                color: (((f.tile_high >> bit) & 1) << 1) | ((f.tile_low >> bit) & 1),
                obp1: attrs.contains(SpriteAttributes::PALETTE),
                bg_priority: attrs.contains(SpriteAttributes::BG_PRIORITY),
            };
        }

        let skip = 8usize.saturating_sub(sprite_x as usize);
        for (slot, pixel) in row.iter().skip(skip).enumerate() {
            if slot >= f.sprite_fifo.len() {
                if !f.sprite_fifo.push(*pixel) {
                    sink_log!(
                        self.sink,
                        Warn,
                        LOG_TARGET,
                        "GB PPU: sprite FIFO overflow at x={}",
                        f.x
                    );
                }
            } else if let Some(existing) = f.sprite_fifo.get_mut(slot) {
                if existing.color == 0 && pixel.color != 0 {
                    *existing = *pixel;
                }
            }
        }
        f.fetching_sprite = false;
    }

    /// Shift one pixel to the LCD, mixing background and sprite.
    fn push_pixel(&mut self) {
        if usize::from(self.fetcher.x) == SCREEN_WIDTH {
            self.set_mode(Mode::HBlank);
            return;
        }

        let f = &mut self.fetcher;
        if f.bg_fifo.is_empty() {
            return;
        }

        if f.scroll_penalty > 0 {
            f.scroll_penalty -= 1;
            if f.discard > 0 {
                f.bg_fifo.pop();
                f.discard -= 1;
            }
            return;
        }

        let Some(bg) = f.bg_fifo.pop() else {
            return;
        };
        let bg_color = if self.lcdc.contains(Lcdc::BG_ENABLE) {
            bg.color
        } else {
            0
        };
        let mut shade = (self.bgp >> (bg_color * 2)) & 0x03;

        if let Some(sprite) = f.sprite_fifo.pop() {
            let hidden = sprite.bg_priority && bg_color != 0;
            if sprite.color != 0 && !hidden && self.lcdc.contains(Lcdc::OBJ_ENABLE) {
                let palette = if sprite.obp1 { self.obp1 } else { self.obp0 };
                shade = (palette >> (sprite.color * 2)) & 0x03;
            }
        }

        let x = usize::from(f.x);
        if let Some(row) = self.frame.get_mut(usize::from(self.ly)) {
            row[x] = shade;
        }
        self.fetcher.x += 1;
    }
}
