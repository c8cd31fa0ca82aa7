//! The animated tree: everything generated once per run plus the particle lists
//! that change every tick.

pub mod compositor;
pub mod ornament;
pub mod particle;
pub mod shape;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    components::canvas::Canvas,
    config::{Palette, SceneConfig},
    constants::glyphs,
    error::{Error, Result},
    scene::{
        compositor::SceneView,
        ornament::OrnamentMap,
        particle::{GlitterField, SnowLayer, SnowLayerBuilder},
        shape::{Geometry, TreeShape},
    },
};

#[derive(Debug)]
pub struct Scene {
    geometry: Geometry,
    tree: TreeShape,
    ornaments: OrnamentMap,
    /// Far layer first so near flakes are painted over it.
    snow: Vec<SnowLayer>,
    glitter: GlitterField,
    config: SceneConfig,
    palette: Palette,
    rng: StdRng,
    seed: u64,
    tick: u64,
}

impl Scene {
    pub fn new(config: SceneConfig, palette: Palette) -> Result<Self> {
        config.validate()?;
        palette.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let geometry = Geometry::new(config.height, config.ground_height);
        let tree = TreeShape::generate(config.height, config.edge_drop, &mut rng);
        let ornaments = ornament::pick_ornaments(&tree.canopy, config.ornament_rate, &palette.ornaments, &mut rng);
        let snow = snow_layers(&config, &geometry)?;
        let glitter_rows = (i32::from(config.height) + 3).min(geometry.rows);
        let glitter = GlitterField::new(config.glitter_rate, config.glitter_max(), geometry.width, glitter_rows);

        Ok(Self { geometry, tree, ornaments, snow, glitter, config, palette, rng, seed, tick: 0 })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[cfg(test)]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[cfg(test)]
    pub fn tree(&self) -> &TreeShape {
        &self.tree
    }

    #[cfg(test)]
    pub fn ornaments(&self) -> &OrnamentMap {
        &self.ornaments
    }

    #[cfg(test)]
    pub fn snow(&self) -> &[SnowLayer] {
        &self.snow
    }

    #[cfg(test)]
    pub fn glitter(&self) -> &GlitterField {
        &self.glitter
    }

    /// Moves every particle, spawns new ones and draws the current tick. The tick
    /// itself only moves on [`Scene::advance_tick`].
    pub fn frame(&mut self) -> Canvas {
        for layer in &mut self.snow {
            layer.step();
        }
        self.glitter.step();

        for layer in &mut self.snow {
            layer.spawn(&mut self.rng);
        }
        self.glitter.spawn(&mut self.rng);

        let view = SceneView {
            geometry: &self.geometry,
            tree: &self.tree,
            ornaments: &self.ornaments,
            snow: &self.snow,
            glitter: &self.glitter,
            config: &self.config,
            palette: &self.palette,
        };
        compositor::compose(&view, self.tick, &mut self.rng)
    }

    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }
}

fn snow_layers(config: &SceneConfig, geometry: &Geometry) -> Result<Vec<SnowLayer>> {
    let width = f64::from(geometry.width);

    let far = SnowLayerBuilder::default()
        .rate(config.snow_rate)
        .spawn_y(0.0)
        .speed(0.04..0.12)
        .drift(-0.03..0.03)
        .floor(f64::from(geometry.ground_start))
        .width(width)
        .glyphs(&glyphs::SNOW_FAR)
        .build()
        .map_err(|e| Error::invalid_config("snow_rate", e.to_string()))?;

    let near = SnowLayerBuilder::default()
        .rate(config.snow_near_rate)
        .spawn_y(-2.0)
        .speed(0.18..0.45)
        .drift(-0.1..0.1)
        .floor(f64::from(geometry.rows))
        .width(width)
        .glyphs(&glyphs::SNOW_NEAR)
        .build()
        .map_err(|e| Error::invalid_config("snow_near_rate", e.to_string()))?;

    Ok(vec![far, near])
}
