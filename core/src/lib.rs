#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use field::*;
pub use generator::*;
pub use render::*;
pub use tile::*;
pub use types::*;

mod error;
mod field;
mod generator;
mod render;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub size: Coord2,
    pub memes: CellCount,
}

impl FieldConfig {
    pub const fn new(size: Coord2, memes: CellCount) -> Self {
        Self { size, memes }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Where the memes are. Produced by a [`MemeGenerator`] and consumed by
/// [`MemeField::with_layout`], which stamps the mask into its tiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemeLayout {
    meme_mask: Array2<bool>,
    meme_count: CellCount,
}

impl MemeLayout {
    pub fn from_meme_mask(meme_mask: Array2<bool>) -> Self {
        let meme_count = meme_mask
            .iter()
            .filter(|&&has_meme| has_meme)
            .count()
            .try_into()
            .unwrap();
        Self {
            meme_mask,
            meme_count,
        }
    }

    pub fn from_meme_coords(size: Coord2, meme_coords: &[Coord2]) -> Result<Self> {
        let mut meme_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in meme_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            meme_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_meme_mask(meme_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.meme_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.meme_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.meme_mask.len().try_into().unwrap()
    }

    pub fn meme_count(&self) -> CellCount {
        self.meme_count
    }

    pub fn contains_meme(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Memes in the edge-clamped 8-neighborhood, the cell itself excluded.
    pub fn adjacent_meme_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .unwrap()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for MemeLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.meme_mask[(x as usize, y as usize)]
    }
}

/// Outcome of a flag click.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
    Won,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the field.
    pub const fn has_update(self) -> bool {
        use FlagOutcome::*;
        match self {
            NoChange => false,
            Flagged => true,
            Unflagged => true,
            Won => true,
        }
    }
}

/// Outcome of a reveal click.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMeme,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the field.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMeme => true,
        }
    }
}
