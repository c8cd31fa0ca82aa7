use color_eyre::eyre::Result;
use strum::Display;
use tracing::info;

use crate::{
    config::Config,
    scene::Scene,
    tui::{self, Event},
};

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}

pub struct App {
    config: Config,
    scene: Scene,
    state: RunState,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let scene = Scene::new(config.scene.clone(), config.palette.clone())?;
        info!(seed = scene.seed(), height = config.scene.height, fps = config.scene.fps, "Scene ready");
        tracing::debug!("{:?}", config.scene);

        Ok(Self { config, scene, state: RunState::Running })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Moves to [`RunState::Stopped`]. Returns whether this call changed the state.
    pub fn stop(&mut self) -> bool {
        if self.state == RunState::Stopped {
            return false;
        }
        info!("{} -> {}", self.state, RunState::Stopped);
        self.state = RunState::Stopped;
        true
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.frame_rate(f64::from(self.config.scene.fps));
        tui.start()?;
        tui.enter()?;

        let status = format!("fps {}  seed {}  Ctrl+C to quit", self.config.scene.fps, self.scene.seed());

        while self.state == RunState::Running {
            let canvas = self.scene.frame();
            tui.draw(&canvas, &status)?;
            self.scene.advance_tick();

            match tui.next().await {
                Some(Event::Frame) => {},
                Some(Event::Interrupt) | None => {
                    self.stop();
                },
            }
        }

        info!(ticks = self.scene.tick(), "Stopped");
        tui.exit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SceneConfig;

    fn app() -> App {
        let config = Config { scene: SceneConfig { seed: Some(9), ..SceneConfig::default() }, ..Config::default() };
        App::new(config).unwrap()
    }

    #[test]
    fn test_starts_running() {
        let app = app();
        assert_eq!(app.state(), RunState::Running);
        assert_eq!(app.scene.seed(), 9);
    }

    #[test]
    fn test_stop_transitions_once() {
        let mut app = app();
        assert!(app.stop());
        assert_eq!(app.state(), RunState::Stopped);
        assert!(!app.stop());
        assert_eq!(app.state(), RunState::Stopped);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(RunState::Running.to_string(), "Running");
        assert_eq!(RunState::Stopped.to_string(), "Stopped");
    }

    #[test]
    fn test_invalid_scene_fails_to_build() {
        let config = Config { scene: SceneConfig { fps: 0, ..SceneConfig::default() }, ..Config::default() };
        assert!(App::new(config).is_err());
    }
}
