use std::collections::BTreeMap;

use rand::{seq::SliceRandom, Rng};

use crate::{
    color::Rgb,
    constants::glyphs,
    scene::shape::{Canopy, Coord},
};

/// A fixed decoration on the canopy. Only its rendered brightness changes over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ornament {
    pub color: Rgb,
    pub glyph: char,
}

pub type OrnamentMap = BTreeMap<Coord, Ornament>;

/// How many ornaments a canopy of `canopy_len` cells gets at `rate`.
pub fn ornament_count(canopy_len: usize, rate: f64) -> usize {
    if canopy_len == 0 {
        return 0;
    }
    let wanted = (rate * canopy_len as f64).round() as usize;
    wanted.clamp(1, canopy_len)
}

/// Picks the ornament positions and colors for this run.
///
/// Positions change between runs but never within one, otherwise the tree would look
/// scattered instead of twinkling.
pub fn pick_ornaments<R: Rng + ?Sized>(canopy: &Canopy, rate: f64, palette: &[Rgb], rng: &mut R) -> OrnamentMap {
    if palette.is_empty() {
        return OrnamentMap::new();
    }

    let mut coords: Vec<Coord> = canopy.iter().copied().collect();
    coords.shuffle(rng);

    coords
        .into_iter()
        .take(ornament_count(canopy.len(), rate))
        .filter_map(|c| {
            let color = *palette.choose(rng)?;
            let glyph = *glyphs::ORNAMENTS.choose(rng)?;
            Some((c, Ornament { color, glyph }))
        })
        .collect()
}
