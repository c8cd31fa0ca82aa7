//! Static tree geometry, generated once per run.

use std::collections::BTreeSet;

use rand::Rng;

/// A cell in tree space. Row 0 is the canopy apex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

pub type Canopy = BTreeSet<Coord>;

/// Width of the logical grid for a tree `height` rows tall.
pub fn grid_width(height: u16) -> i32 {
    2 * i32::from(height) - 1
}

/// Trunk `(width, height)` in cells.
pub fn trunk_size(height: u16) -> (i32, i32) {
    let width = (grid_width(height) / 7).max(5);
    let rows = (i32::from(height) / 6).max(3);
    (width, rows)
}

/// The unperturbed canopy rows as `(y, start_x, width)`.
pub fn canopy_rows(height: u16) -> impl Iterator<Item = (i32, i32, i32)> {
    let grid = grid_width(height);
    (0..i32::from(height)).map(move |y| {
        let width = 2 * y + 1;
        (y, (grid - width) / 2, width)
    })
}

/// Builds the triangular canopy.
///
/// From the fourth row down, each edge cell is dropped with probability `edge_drop`
/// so the silhouette looks ragged. The decision is made here, once.
pub fn build_canopy<R: Rng + ?Sized>(height: u16, edge_drop: f64, rng: &mut R) -> Canopy {
    let mut canopy = Canopy::new();
    for (y, start, width) in canopy_rows(height) {
        let end = start + width - 1;
        for x in start..=end {
            let edge = x == start || x == end;
            if y > 2 && edge && rng.gen::<f64>() < edge_drop {
                continue;
            }
            canopy.insert(Coord::new(x, y));
        }
    }
    canopy
}

pub fn build_trunk(height: u16) -> BTreeSet<Coord> {
    let (width, rows) = trunk_size(height);
    let left = (grid_width(height) - width) / 2;
    let top = i32::from(height);

    (top..top + rows).flat_map(|y| (left..left + width).map(move |x| Coord::new(x, y))).collect()
}

/// The striped base row, one empty row below the trunk.
pub fn build_band(height: u16) -> Vec<Coord> {
    let (_, trunk_rows) = trunk_size(height);
    let y = i32::from(height) + trunk_rows + 1;
    (0..grid_width(height)).map(|x| Coord::new(x, y)).collect()
}

/// Where everything sits on screen. Scene rows are tree rows shifted down by one to
/// make room for the star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub height: u16,
    pub width: i32,
    pub trunk_rows: i32,
    pub band_row: i32,
    pub ground_start: i32,
    pub ground_rows: i32,
    pub rows: i32,
}

impl Geometry {
    pub const STAR_ROW: i32 = 0;
    const CANOPY_OFFSET: i32 = 1;

    pub fn new(height: u16, ground_height: u16) -> Self {
        let width = grid_width(height);
        let (_, trunk_rows) = trunk_size(height);
        let band_row = Self::CANOPY_OFFSET + i32::from(height) + trunk_rows + 1;
        let ground_start = band_row + 1;
        let ground_rows = i32::from(ground_height);

        Self { height, width, trunk_rows, band_row, ground_start, ground_rows, rows: ground_start + ground_rows }
    }

    /// Maps a tree-space coordinate to its scene cell.
    pub fn to_scene(&self, c: Coord) -> (i32, i32) {
        (c.x, c.y + Self::CANOPY_OFFSET)
    }

    pub fn star(&self) -> (i32, i32) {
        (self.width / 2, Self::STAR_ROW)
    }

    pub fn is_ground(&self, y: i32) -> bool {
        y >= self.ground_start
    }
}

/// The static parts of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeShape {
    pub canopy: Canopy,
    pub trunk: BTreeSet<Coord>,
    pub band: Vec<Coord>,
}

impl TreeShape {
    pub fn generate<R: Rng + ?Sized>(height: u16, edge_drop: f64, rng: &mut R) -> Self {
        Self { canopy: build_canopy(height, edge_drop, rng), trunk: build_trunk(height), band: build_band(height) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_row_widths_for_height_five() {
        let rows: Vec<_> = canopy_rows(5).collect();
        assert_eq!(rows, vec![(0, 4, 1), (1, 3, 3), (2, 2, 5), (3, 1, 7), (4, 0, 9)]);
        assert_eq!(grid_width(5), 9);
    }

    #[test]
    fn test_canopy_without_edge_drop_is_full_triangle() {
        let mut rng = StdRng::seed_from_u64(1);
        let canopy = build_canopy(5, 0.0, &mut rng);
        let widths: Vec<usize> = (0..5).map(|y| canopy.iter().filter(|c| c.y == y).count()).collect();
        assert_eq!(widths, vec![1, 3, 5, 7, 9]);
        // Each row is centered in the width-9 grid.
        for (y, start, width) in canopy_rows(5) {
            assert!(canopy.contains(&Coord::new(start, y)));
            assert!(canopy.contains(&Coord::new(start + width - 1, y)));
            assert_eq!(start, 8 - (start + width - 1));
        }
    }

    #[test]
    fn test_edge_drop_only_touches_edges_below_row_two() {
        let mut rng = StdRng::seed_from_u64(7);
        let canopy = build_canopy(12, 1.0, &mut rng);
        for (y, start, width) in canopy_rows(12) {
            let end = start + width - 1;
            let row: Vec<i32> = canopy.iter().filter(|c| c.y == y).map(|c| c.x).collect();
            if y <= 2 {
                assert_eq!(row, (start..=end).collect::<Vec<_>>());
            } else {
                assert_eq!(row, (start + 1..end).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_canopy_is_reproducible_with_seed() {
        let a = build_canopy(20, 0.3, &mut StdRng::seed_from_u64(42));
        let b = build_canopy(20, 0.3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_trunk_is_centered_below_canopy() {
        let trunk = build_trunk(18);
        let (width, rows) = trunk_size(18);
        assert_eq!((width, rows), (5, 3));
        assert_eq!(trunk.len(), 15);
        assert!(trunk.iter().all(|c| (18..21).contains(&c.y)));
        let left = trunk.iter().map(|c| c.x).min().unwrap();
        let right = trunk.iter().map(|c| c.x).max().unwrap();
        assert_eq!(left, grid_width(18) - 1 - right);
    }

    #[test]
    fn test_trunk_grows_with_height() {
        assert_eq!(trunk_size(3), (5, 3));
        assert_eq!(trunk_size(42), (11, 7));
    }

    #[test]
    fn test_geometry_layout() {
        let g = Geometry::new(18, 5);
        assert_eq!(g.width, 35);
        assert_eq!(g.band_row, 23);
        assert_eq!(g.ground_start, 24);
        assert_eq!(g.rows, 29);
        assert_eq!(g.star(), (17, 0));

        let band = build_band(18);
        assert_eq!(band.len(), 35);
        assert!(band.iter().all(|c| g.to_scene(*c).1 == g.band_row));
    }
}
