use ndarray::Array2;

use super::*;

/// Places memes by rejection sampling: draw a uniform coordinate, retry on
/// collision until the requested count of distinct cells is memed.
///
/// Unbounded in the worst case but terminates almost surely whenever the
/// count stays below the cell total; a count at or past the total skips the
/// loop and fills the whole field instead.
/// The distribution over meme subsets is only approximately uniform; a
/// partial-shuffle selection would be exact, but the rejection strategy is
/// kept as the canonical behavior.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMemeGenerator {
    seed: u64,
}

impl RandomMemeGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MemeGenerator for RandomMemeGenerator {
    fn generate(self, config: FieldConfig) -> MemeLayout {
        use rand::prelude::*;

        let (size_x, size_y) = config.size;
        let total_cells = config.total_cells();

        // a full board would make the rejection loop spin forever
        if config.memes >= total_cells {
            if config.memes > total_cells {
                log::warn!(
                    "requested {} memes but the field only holds {}, filling it",
                    config.memes,
                    total_cells
                );
            }
            return MemeLayout::from_meme_mask(Array2::from_elem(
                config.size.to_nd_index(),
                true,
            ));
        }

        let mut meme_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut placed: CellCount = 0;
        while placed < config.memes {
            let coords: Coord2 = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            let cell = &mut meme_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        let layout = MemeLayout::from_meme_mask(meme_mask);
        if layout.meme_count() != config.memes {
            log::warn!(
                "generated meme count mismatch, actual: {}, requested: {}",
                layout.meme_count(),
                config.memes
            );
        }
        layout
    }
}
