/// Single coordinate axis used for field width, height, and positions.
pub type Coord = u8;

/// Count type used for meme counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional grid coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// All coordinates of a `size` grid in reading order, `y` outer, `x` inner.
pub fn iter_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    let (size_x, size_y) = size;
    (0..size_y).flat_map(move |y| (0..size_x).map(move |x| (x, y)))
}

/// Iterates the up-to-8 in-bounds neighbors of `center`, walking the
/// neighborhood box clamped to `[0,w)×[0,h)` and skipping the center itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    x_start: Coord,
    x_end: Coord,
    y_end: Coord,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (cx, cy) = center;
        let (size_x, size_y) = bounds;
        debug_assert!(cx < size_x && cy < size_y);

        let x_start = cx.saturating_sub(1);
        let y_start = cy.saturating_sub(1);
        let x_end = (cx + 1).min(size_x - 1);
        let y_end = (cy + 1).min(size_y - 1);
        Self {
            center,
            x_start,
            x_end,
            y_end,
            cursor: Some((x_start, y_start)),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.cursor?;
            self.cursor = if current.0 < self.x_end {
                Some((current.0 + 1, current.1))
            } else if current.1 < self.y_end {
                Some((self.x_start, current.1 + 1))
            } else {
                None
            };

            if current != self.center {
                return Some(current);
            }
        }
    }
}
