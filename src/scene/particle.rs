//! Snow and glitter. Each list owns its particles and is stepped once per tick.

use std::ops::{Range, RangeInclusive};

use derive_builder::Builder;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snowflake {
    pub x: f64,
    pub y: f64,
    /// Rows per tick.
    pub speed: f64,
    /// Columns per tick.
    pub drift: f64,
}

/// One depth layer of falling snow.
#[derive(Debug, Clone, Builder)]
pub struct SnowLayer {
    /// Chance of a new flake per tick.
    rate: f64,
    /// Row new flakes start on. Negative rows let a flake slide in from above.
    #[builder(default)]
    spawn_y: f64,
    speed: Range<f64>,
    drift: Range<f64>,
    /// Flakes at or below this row are removed.
    floor: f64,
    /// Horizontal extent; flakes wrap around it.
    width: f64,
    glyphs: &'static [char],
    #[builder(setter(skip), default)]
    flakes: Vec<Snowflake>,
}

impl SnowLayer {
    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn glyphs(&self) -> &'static [char] {
        self.glyphs
    }

    #[cfg(test)]
    pub fn floor(&self) -> f64 {
        self.floor
    }

    #[cfg(test)]
    pub fn push(&mut self, flake: Snowflake) {
        self.flakes.push(flake);
    }

    /// Rolls for one new flake. Returns whether one was added.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if rng.gen::<f64>() >= self.rate {
            return false;
        }
        let flake = Snowflake {
            x: rng.gen_range(0.0..self.width),
            y: self.spawn_y,
            speed: rng.gen_range(self.speed.clone()),
            drift: rng.gen_range(self.drift.clone()),
        };
        self.flakes.push(flake);
        true
    }

    pub fn advance(&mut self) {
        for flake in &mut self.flakes {
            flake.x = (flake.x + flake.drift).rem_euclid(self.width);
            flake.y += flake.speed;
        }
    }

    pub fn prune(&mut self) {
        let floor = self.floor;
        self.flakes.retain(|flake| flake.y < floor);
    }

    pub fn step(&mut self) {
        self.advance();
        self.prune();
    }

    /// The scene cell a flake occupies, if it is on screen yet.
    pub fn cell(&self, flake: &Snowflake) -> Option<(i32, i32)> {
        let y = flake.y.floor();
        if y < 0.0 || y >= self.floor {
            return None;
        }
        let x = (flake.x.floor() as i32).rem_euclid(self.width as i32);
        Some((x, y as i32))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glitter {
    pub x: i32,
    pub y: i32,
    /// Frames left to show, including the current one.
    pub life: i32,
}

/// Short-lived sparkles scattered around the tree.
#[derive(Debug, Clone)]
pub struct GlitterField {
    rate: f64,
    max: usize,
    width: i32,
    rows: i32,
    life: RangeInclusive<i32>,
    sparks: Vec<Glitter>,
}

impl GlitterField {
    pub const LIFE: RangeInclusive<i32> = 2..=5;

    /// Sparks land anywhere in `width` columns and the first `rows` scene rows.
    pub fn new(rate: f64, max: usize, width: i32, rows: i32) -> Self {
        Self { rate, max, width, rows, life: Self::LIFE, sparks: Vec::new() }
    }

    pub fn sparks(&self) -> &[Glitter] {
        &self.sparks
    }

    #[cfg(test)]
    pub fn push(&mut self, spark: Glitter) {
        self.sparks.push(spark);
    }

    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.sparks.len() >= self.max || rng.gen::<f64>() >= self.rate {
            return false;
        }
        let spark = Glitter {
            x: rng.gen_range(0..self.width),
            y: rng.gen_range(0..self.rows),
            life: rng.gen_range(self.life.clone()),
        };
        self.sparks.push(spark);
        true
    }

    pub fn advance(&mut self) {
        for spark in &mut self.sparks {
            spark.life -= 1;
        }
    }

    pub fn prune(&mut self) {
        self.sparks.retain(|spark| spark.life > 0);
    }

    pub fn step(&mut self) {
        self.advance();
        self.prune();
    }
}
