use crate::{Coord, Coord2, FieldState, MemeField, Tile, TileState};

/// Side length of one tile sprite in pixels.
pub const TILE_SIZE: i32 = 16;

/// Border drawn around the field by the rendering collaborator.
pub const BORDER_WIDTH: i32 = 4;

/// Which sprite the rendering collaborator should draw for a tile. The core
/// picks the visual; drawing itself stays outside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileVisual {
    /// Unrevealed button face.
    Button,
    /// Button face with a flag on top.
    Flag,
    /// Revealed tile with its adjacent meme count.
    Number(u8),
    /// A meme, exposed or prematurely revealed.
    Meme,
    /// The meme whose reveal lost the game, highlighted.
    MemeHit,
    /// A correctly flagged meme, shown once the field is lost.
    MemeFlagged,
    /// A flag that turned out to cover no meme, crossed out.
    MemeCrossed,
}

impl Tile {
    /// Selects the visual for this tile. In the [`FieldState::Lost`] state
    /// hidden memes are exposed, wrong flags crossed out, and the revealed
    /// meme highlighted.
    pub fn visual(self, field_state: FieldState) -> TileVisual {
        use TileState::*;
        use TileVisual::*;

        if field_state != FieldState::Lost {
            match self.state() {
                Hidden => Button,
                Flagged => Flag,
                Revealed if self.has_meme() => Meme,
                Revealed => Number(self.adjacent_memes()),
            }
        } else {
            match self.state() {
                Hidden if self.has_meme() => Meme,
                Hidden => Button,
                Flagged if self.has_meme() => MemeFlagged,
                Flagged => MemeCrossed,
                Revealed if self.has_meme() => MemeHit,
                Revealed => Number(self.adjacent_memes()),
            }
        }
    }
}

/// Pixel-space bounds of the field, `right` and `bottom` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub const fn expanded(self, margin: i32) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    pub fn contains(self, (x, y): (i32, i32)) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Top-left pixel of a tile, given the field's on-screen origin.
pub const fn grid_to_screen(origin: (i32, i32), coords: Coord2) -> (i32, i32) {
    (
        origin.0 + coords.0 as i32 * TILE_SIZE,
        origin.1 + coords.1 as i32 * TILE_SIZE,
    )
}

impl MemeField {
    /// Maps a screen position to grid coordinates by integer division,
    /// `None` when the position misses the field.
    pub fn screen_to_grid(&self, origin: (i32, i32), screen: (i32, i32)) -> Option<Coord2> {
        let dx = screen.0 - origin.0;
        let dy = screen.1 - origin.1;
        if dx < 0 || dy < 0 {
            return None;
        }

        let grid_x = dx / TILE_SIZE;
        let grid_y = dy / TILE_SIZE;
        let (size_x, size_y) = self.size();
        if grid_x < i32::from(size_x) && grid_y < i32::from(size_y) {
            Some((grid_x as Coord, grid_y as Coord))
        } else {
            None
        }
    }

    pub fn pixel_rect(&self, origin: (i32, i32)) -> PixelRect {
        let (size_x, size_y) = self.size();
        PixelRect {
            left: origin.0,
            top: origin.1,
            right: origin.0 + i32::from(size_x) * TILE_SIZE,
            bottom: origin.1 + i32::from(size_y) * TILE_SIZE,
        }
    }
}
