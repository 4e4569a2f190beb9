use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldState {
    InProgress,
    Won,
    Lost,
}

impl FieldState {
    /// Indicates the game has ended and no click has an effect anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for FieldState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// The full grid plus game-state tracking. Owns every [`Tile`] exclusively;
/// all mutation goes through the two click handlers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemeField {
    tiles: Array2<Tile>,
    size: Coord2,
    meme_count: CellCount,
    flagged_count: CellCount,
    state: FieldState,
}

impl MemeField {
    /// Builds a field with `config.memes` memes placed by `generator`.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < config.memes < width * height`.
    pub fn new<G: MemeGenerator>(config: FieldConfig, generator: G) -> Self {
        assert!(
            config.memes > 0 && config.memes < config.total_cells(),
            "meme count must satisfy 0 < memes < total cells"
        );
        Self::with_layout(generator.generate(config))
    }

    /// Builds a field from an explicit layout. Every tile gets its adjacent
    /// meme count stored exactly once, before the field is handed out.
    pub fn with_layout(layout: MemeLayout) -> Self {
        let size = layout.size();
        let mut tiles: Array2<Tile> = Array2::default(size.to_nd_index());

        for coords in iter_coords(size) {
            if layout.contains_meme(coords) {
                tiles[coords.to_nd_index()].spawn_meme();
            }
        }
        for coords in iter_coords(size) {
            tiles[coords.to_nd_index()].set_adjacent_memes(layout.adjacent_meme_count(coords));
        }

        log::debug!(
            "field constructed: {:?} cells, {} memes",
            size,
            layout.meme_count()
        );
        Self {
            tiles,
            size,
            meme_count: layout.meme_count(),
            flagged_count: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_memes(&self) -> CellCount {
        self.meme_count
    }

    /// How many memes have not been flagged yet. Negative with overflagging.
    pub fn memes_left(&self) -> isize {
        (self.meme_count as isize) - (self.flagged_count as isize)
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    /// Row-major enumeration of every tile with its coordinates, for the
    /// rendering collaborator.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        iter_coords(self.size).map(move |coords| (coords, self.tile_at(coords)))
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Reveals exactly the addressed tile; no neighbor cascade. Flagged and
    /// already-revealed tiles are left untouched, as is a finished field.
    pub fn reveal_click(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(NoChange);
        }

        let tile = self.tile_at(coords);
        if tile.is_revealed() || tile.is_flagged() {
            return Ok(NoChange);
        }

        self.tiles[coords.to_nd_index()].reveal();
        Ok(if tile.has_meme() {
            log::debug!("meme revealed at {:?}, field lost", coords);
            self.state = FieldState::Lost;
            HitMeme
        } else {
            log::debug!(
                "revealed tile at {:?}, adjacent memes: {}",
                coords,
                tile.adjacent_memes()
            );
            Revealed
        })
    }

    /// Toggles the flag on a hidden tile, then re-derives the win condition.
    /// Revealed tiles and finished fields are left untouched.
    pub fn flag_click(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(NoChange);
        }

        if self.tile_at(coords).is_revealed() {
            return Ok(NoChange);
        }

        self.tiles[coords.to_nd_index()].toggle_flag();
        let flagged_now = self.tile_at(coords).is_flagged();
        if flagged_now {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }

        // Unflagging can complete the win too, when it removes the last
        // wrong flag. The scan runs after every toggle.
        Ok(if self.is_won() {
            log::debug!("exactly the memes are flagged, field won");
            self.state = FieldState::Won;
            Won
        } else if flagged_now {
            Flagged
        } else {
            Unflagged
        })
    }

    /// Won iff a tile has a meme exactly when it is flagged, grid-wide.
    fn is_won(&self) -> bool {
        self.tiles
            .iter()
            .all(|tile| tile.has_meme() == tile.is_flagged())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, memes: &[Coord2]) -> MemeLayout {
        MemeLayout::from_meme_coords(size, memes).unwrap()
    }

    fn field(size: Coord2, memes: &[Coord2]) -> MemeField {
        MemeField::with_layout(layout(size, memes))
    }

    #[test]
    fn construction_stamps_exactly_the_layout_memes() {
        let field = field((3, 3), &[(0, 0), (2, 1)]);

        let memed: u16 = field.tiles().filter(|(_, tile)| tile.has_meme()).count() as u16;
        assert_eq!(memed, 2);
        assert_eq!(field.total_memes(), 2);
        assert!(field.tile_at((0, 0)).has_meme());
        assert!(field.tile_at((2, 1)).has_meme());
        assert_eq!(field.state(), FieldState::InProgress);
    }

    #[test]
    fn adjacent_counts_around_a_center_meme() {
        let field = field((3, 3), &[(1, 1)]);

        for (coords, tile) in field.tiles() {
            let expected = if coords == (1, 1) { 0 } else { 1 };
            assert_eq!(tile.adjacent_memes(), expected, "at {:?}", coords);
        }
    }

    #[test]
    fn adjacent_counts_are_edge_clamped() {
        let field = field((2, 2), &[(0, 0), (1, 1)]);

        assert_eq!(field.tile_at((1, 0)).adjacent_memes(), 2);
        assert_eq!(field.tile_at((0, 0)).adjacent_memes(), 1);
    }

    #[test]
    fn reveal_shows_the_stored_count() {
        let mut field = field((3, 3), &[(1, 1)]);

        assert_eq!(field.reveal_click((0, 0)).unwrap(), RevealOutcome::Revealed);
        let tile = field.tile_at((0, 0));
        assert!(tile.is_revealed());
        assert_eq!(tile.adjacent_memes(), 1);
        assert_eq!(field.state(), FieldState::InProgress);
    }

    #[test]
    fn flagging_the_lone_center_meme_wins() {
        let mut field = field((3, 3), &[(1, 1)]);

        assert_eq!(field.reveal_click((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(field.tile_at((0, 0)).adjacent_memes(), 1);
        assert_eq!(field.flag_click((1, 1)).unwrap(), FlagOutcome::Won);
        assert_eq!(field.state(), FieldState::Won);
    }

    #[test]
    fn flag_protects_a_tile_from_reveal() {
        let mut field = field((3, 3), &[(1, 1), (2, 0)]);

        field.flag_click((1, 1)).unwrap();
        assert_eq!(field.reveal_click((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert!(field.tile_at((1, 1)).is_flagged());
        assert_eq!(field.state(), FieldState::InProgress);
    }

    #[test]
    fn revealing_twice_is_a_noop() {
        let mut field = field((3, 3), &[(1, 1)]);

        assert_eq!(field.reveal_click((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(field.reveal_click((0, 0)).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn reveal_does_not_cascade_into_zero_neighbors() {
        let mut field = field((5, 5), &[(4, 4)]);

        field.reveal_click((0, 0)).unwrap();

        let revealed = field.tiles().filter(|(_, tile)| tile.is_revealed()).count();
        assert_eq!(revealed, 1);
        assert_eq!(field.tile_at((0, 0)).adjacent_memes(), 0);
        assert!(!field.tile_at((0, 1)).is_revealed());
    }

    #[test]
    fn flagging_a_revealed_tile_is_rejected() {
        let mut field = field((3, 3), &[(1, 1)]);

        field.reveal_click((0, 0)).unwrap();
        assert_eq!(field.flag_click((0, 0)).unwrap(), FlagOutcome::NoChange);
        assert!(field.tile_at((0, 0)).is_revealed());
    }

    #[test]
    fn flag_roundtrip_restores_hidden() {
        let mut field = field((3, 3), &[(1, 1)]);

        assert_eq!(field.flag_click((0, 0)).unwrap(), FlagOutcome::Flagged);
        assert_eq!(field.memes_left(), 0);
        assert_eq!(field.flag_click((0, 0)).unwrap(), FlagOutcome::Unflagged);
        assert_eq!(field.memes_left(), 1);
        assert_eq!(field.tile_at((0, 0)).state(), TileState::Hidden);
    }

    #[test]
    fn win_arrives_only_with_the_last_correct_flag() {
        let mut field = field((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(field.flag_click((0, 0)).unwrap(), FlagOutcome::Flagged);
        assert_eq!(field.state(), FieldState::InProgress);
        assert_eq!(field.flag_click((2, 2)).unwrap(), FlagOutcome::Won);
        assert_eq!(field.state(), FieldState::Won);
        assert!(field.is_finished());
    }

    #[test]
    fn an_extra_wrong_flag_blocks_the_win() {
        let mut field = field((3, 3), &[(0, 0), (2, 2)]);

        field.flag_click((0, 0)).unwrap();
        field.flag_click((1, 1)).unwrap();
        assert_eq!(field.flag_click((2, 2)).unwrap(), FlagOutcome::Flagged);
        assert_eq!(field.state(), FieldState::InProgress);

        // removing the wrong flag is what completes the win
        assert_eq!(field.flag_click((1, 1)).unwrap(), FlagOutcome::Won);
        assert_eq!(field.state(), FieldState::Won);
    }

    #[test]
    fn revealing_a_meme_loses_and_freezes_the_field() {
        let mut field = field((3, 3), &[(1, 1)]);

        assert_eq!(field.reveal_click((1, 1)).unwrap(), RevealOutcome::HitMeme);
        assert_eq!(field.state(), FieldState::Lost);

        assert_eq!(field.reveal_click((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(field.flag_click((0, 0)).unwrap(), FlagOutcome::NoChange);
        assert!(!field.tile_at((0, 0)).is_revealed());
        assert_eq!(field.state(), FieldState::Lost);
    }

    #[test]
    fn clicks_after_a_win_are_noops() {
        let mut field = field((2, 1), &[(0, 0)]);

        assert_eq!(field.flag_click((0, 0)).unwrap(), FlagOutcome::Won);
        assert_eq!(field.reveal_click((1, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(field.flag_click((0, 0)).unwrap(), FlagOutcome::NoChange);
        assert!(field.tile_at((0, 0)).is_flagged());
    }

    #[test]
    fn out_of_bounds_clicks_are_rejected_without_mutation() {
        let mut field = field((3, 3), &[(1, 1)]);

        assert_eq!(field.reveal_click((3, 0)), Err(GameError::OutOfBounds));
        assert_eq!(field.flag_click((0, 3)), Err(GameError::OutOfBounds));
        assert_eq!(field.state(), FieldState::InProgress);
    }

    #[test]
    #[should_panic(expected = "meme count must satisfy")]
    fn zero_memes_is_a_fatal_precondition() {
        MemeField::new(FieldConfig::new((3, 3), 0), RandomMemeGenerator::new(7));
    }

    #[test]
    #[should_panic(expected = "meme count must satisfy")]
    fn a_full_field_of_memes_is_a_fatal_precondition() {
        MemeField::new(FieldConfig::new((3, 3), 9), RandomMemeGenerator::new(7));
    }

    #[test]
    fn serde_roundtrip_preserves_a_mid_game_field() {
        let mut field = field((3, 3), &[(0, 0), (2, 2)]);
        field.reveal_click((1, 1)).unwrap();
        field.flag_click((0, 0)).unwrap();

        let encoded = serde_json::to_string(&field).unwrap();
        let decoded: MemeField = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, field);
    }
}
