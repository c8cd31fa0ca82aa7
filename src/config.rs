use std::path::PathBuf;

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use crate::{
    cli::Cli,
    color::Rgb,
    constants::palette,
    error::Error,
    utils::{get_config_dir, get_data_dir, PROJECT_NAME},
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// Optional paint passes. Turning all of them off gives the plain tree on the
/// terminal's own background.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layers {
    pub sky: bool,
    pub stars: bool,
    pub garland: bool,
    pub reflection: bool,
    pub snow_texture: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self { sky: true, stars: true, garland: true, reflection: true, snow_texture: true }
    }
}

impl Layers {
    pub fn minimal() -> Self {
        Self { sky: false, stars: false, garland: false, reflection: false, snow_texture: false }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canopy rows. The scene is `2 * height - 1` columns wide.
    pub height: u16,
    pub fps: u16,
    /// Share of canopy cells that become ornaments.
    pub ornament_rate: f64,
    /// Per-frame chance an ornament flashes a different glyph.
    pub twinkle_rate: f64,
    /// Per-frame chance a leaf flashes as a light.
    pub sparkle_rate: f64,
    /// Chance each canopy edge cell is left out.
    pub edge_drop: f64,
    pub snow_rate: f64,
    pub snow_near_rate: f64,
    pub glitter_rate: f64,
    /// Most glitter alive at once. Defaults to `height`.
    pub glitter_max: Option<usize>,
    pub ground_height: u16,
    pub reflection_fade: f64,
    /// Fixed RNG seed. Unset means a fresh seed every run.
    pub seed: Option<u64>,
    pub layers: Layers,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            height: 18,
            fps: 14,
            ornament_rate: 0.16,
            twinkle_rate: 0.35,
            sparkle_rate: 0.012,
            edge_drop: 0.3,
            snow_rate: 0.05,
            snow_near_rate: 0.025,
            glitter_rate: 0.04,
            glitter_max: None,
            ground_height: 5,
            reflection_fade: 0.55,
            seed: None,
            layers: Layers::default(),
        }
    }
}

impl SceneConfig {
    pub fn glitter_max(&self) -> usize {
        self.glitter_max.unwrap_or(usize::from(self.height))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(3..=120).contains(&self.height) {
            return Err(Error::invalid_config("height", format!("{} is outside 3..=120", self.height)));
        }
        if !(1..=120).contains(&self.fps) {
            return Err(Error::invalid_config("fps", format!("{} is outside 1..=120", self.fps)));
        }
        if self.ground_height > 40 {
            return Err(Error::invalid_config("ground_height", format!("{} is larger than 40", self.ground_height)));
        }
        if !(self.ornament_rate > 0.0 && self.ornament_rate <= 1.0) {
            return Err(Error::invalid_config("ornament_rate", format!("{} is outside (0, 1]", self.ornament_rate)));
        }

        let probabilities = [
            ("twinkle_rate", self.twinkle_rate),
            ("sparkle_rate", self.sparkle_rate),
            ("edge_drop", self.edge_drop),
            ("snow_rate", self.snow_rate),
            ("snow_near_rate", self.snow_near_rate),
            ("glitter_rate", self.glitter_rate),
            ("reflection_fade", self.reflection_fade),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_config(field, format!("{value} is outside [0, 1]")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub ornaments: Vec<Rgb>,
    pub star: Vec<Rgb>,
    pub garland: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ornaments: palette::ORNAMENTS.to_vec(),
            star: palette::STAR.to_vec(),
            garland: palette::GARLAND.to_vec(),
        }
    }
}

impl Palette {
    pub fn validate(&self) -> Result<(), Error> {
        if self.ornaments.is_empty() {
            return Err(Error::invalid_config("palette.ornaments", "needs at least one color"));
        }
        if self.star.is_empty() {
            return Err(Error::invalid_config("palette.star", "needs at least one color"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub palette: Palette,
}

impl Config {
    /// Layers, lowest first: built-in defaults, the user's `config.yaml`, the file given
    /// on the command line, `TWINKLE_TREE__SECTION__KEY` variables, then CLI flags.
    pub fn new(cli: &Cli) -> Result<Self> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Yaml))
            .set_default("_data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("_config_dir", config_dir.to_string_lossy().as_ref())?;

        let user_config = config_dir.join("config.yaml");
        if !user_config.exists() {
            tracing::debug!("No user configuration at {}, using defaults", user_config.display());
        }
        builder = builder.add_source(config::File::from(user_config).format(config::FileFormat::Yaml).required(false));

        if let Some(path) = &cli.config {
            builder = builder.add_source(config::File::from(path.clone()).format(config::FileFormat::Yaml));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(PROJECT_NAME.as_str())
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cli.apply(&mut cfg.scene);
        cfg.validate()?;

        Ok(cfg)
    }

    /// The configuration shipped with the binary.
    #[cfg(test)]
    pub fn builtin() -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(CONFIG)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.scene.validate()?;
        self.palette.validate()
    }
}
