use std::path::PathBuf;

use clap::Parser;

use crate::config::{Layers, SceneConfig};

#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub struct Cli {
    /// Canopy height in rows
    #[arg(long, value_name = "ROWS")]
    pub height: Option<u16>,

    /// Frames per second
    #[arg(short, long, value_name = "FPS")]
    pub fps: Option<u16>,

    /// Seed the random generator for a reproducible tree
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Extra configuration file, applied over the user config
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Plain tree: no sky, garland, reflection or ground texture
    #[arg(long)]
    pub minimal: bool,
}

impl Cli {
    /// Flags win over every configuration source.
    pub fn apply(&self, scene: &mut SceneConfig) {
        if let Some(height) = self.height {
            scene.height = height;
        }
        if let Some(fps) = self.fps {
            scene.fps = fps;
        }
        if let Some(seed) = self.seed {
            scene.seed = Some(seed);
        }
        if self.minimal {
            scene.layers = Layers::minimal();
        }
    }
}
