use serde::{Deserialize, Serialize};

/// Player-visible state of a single tile. `Revealed` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Flagged,
    Revealed,
}

impl Default for TileState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One grid cell: an immutable meme flag plus a shallow state machine.
/// Mutation goes through the owning [`crate::MemeField`] only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    has_meme: bool,
    state: TileState,
    adjacent_memes: Option<u8>,
}

impl Tile {
    /// Construction-time only, at most once per tile.
    pub(crate) fn spawn_meme(&mut self) {
        debug_assert!(!self.has_meme);
        self.has_meme = true;
    }

    pub(crate) fn reveal(&mut self) {
        debug_assert_eq!(self.state, TileState::Hidden);
        self.state = TileState::Revealed;
    }

    pub(crate) fn toggle_flag(&mut self) {
        debug_assert!(!self.is_revealed());
        self.state = match self.state {
            TileState::Hidden => TileState::Flagged,
            TileState::Flagged => TileState::Hidden,
            TileState::Revealed => TileState::Revealed,
        };
    }

    /// Stored exactly once, after all memes are placed.
    pub(crate) fn set_adjacent_memes(&mut self, count: u8) {
        debug_assert!(self.adjacent_memes.is_none());
        self.adjacent_memes = Some(count);
    }

    pub const fn has_meme(self) -> bool {
        self.has_meme
    }

    pub const fn state(self) -> TileState {
        self.state
    }

    pub fn is_revealed(self) -> bool {
        self.state == TileState::Revealed
    }

    pub fn is_flagged(self) -> bool {
        self.state == TileState::Flagged
    }

    /// Memes among the up-to-8 adjacent cells.
    ///
    /// # Panics
    ///
    /// Panics if queried before the owning field finished construction.
    pub fn adjacent_memes(self) -> u8 {
        self.adjacent_memes
            .expect("adjacent meme count queried before field construction finished")
    }
}
