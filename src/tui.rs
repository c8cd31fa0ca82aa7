use std::{
    io::{self, Stdout},
    time::Duration,
};

use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    Terminal,
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, error};

use crate::{components::canvas::Canvas, error::Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The next frame boundary has passed.
    Frame,
    /// Ctrl+C, or SIGTERM on unix.
    Interrupt,
}

pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
    pub task: Option<JoinHandle<()>>,
    pub event_rx: UnboundedReceiver<Event>,
    pub event_tx: UnboundedSender<Event>,
    pub frame_rate: f64,
    screen: Screen,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self { terminal, task: None, event_rx, event_tx, frame_rate: 14.0, screen: Screen::default() })
    }

    pub fn frame_rate(&mut self, frame_rate: f64) {
        self.frame_rate = frame_rate;
    }

    /// Registers the signal listeners and spawns the task that turns frame boundaries
    /// and signals into events. Call before [`Tui::enter`] so an early Ctrl+C is never
    /// handled by the default action, which would leave the screen behind.
    pub fn start(&mut self) -> Result<()> {
        self.cancel();
        let mut interrupts = Interrupts::register()?;
        let period = Duration::from_secs_f64(1.0 / self.frame_rate);
        let event_tx = self.event_tx.clone();
        self.task = Some(tokio::spawn(async move {
            let mut frames = tokio::time::interval(period);
            frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes at once and the first frame is drawn before waiting.
            frames.tick().await;

            loop {
                let event = tokio::select! {
                    _ = frames.tick() => Event::Frame,
                    _ = interrupts.recv() => Event::Interrupt,
                };
                if event_tx.send(event).is_err() || event == Event::Interrupt {
                    break;
                }
            }
        }));
        Ok(())
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.screen.enter(|| execute!(io::stdout(), EnterAlternateScreen, cursor::Hide))?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Gives the terminal back. Only the first call after [`Tui::enter`] does anything.
    pub fn exit(&mut self) -> Result<()> {
        self.cancel();
        if self.screen.leave(restore)? {
            debug!("Terminal restored");
        }
        Ok(())
    }

    /// Draws the frame centered on screen with a one-line status under it.
    pub fn draw(&mut self, canvas: &Canvas, status: &str) -> Result<()> {
        self.terminal.draw(|f| {
            let area = centered(f.area(), canvas.width() as u16, canvas.height() as u16 + 1);
            let [scene, footer] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            f.render_widget(canvas, scene);
            f.render_widget(Line::styled(status, Style::new().add_modifier(Modifier::DIM)).centered(), footer);
        })?;
        Ok(())
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!("Failed to restore terminal: {e}");
        }
    }
}

/// Leaves the alternate screen and shows the cursor again.
pub fn restore() -> io::Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show, ResetColor)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, area, _] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)]).areas(area);
    let [_, area, _] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)]).areas(area);
    area
}

/// Whether the alternate screen is held, so it is given back exactly once.
#[derive(Debug, Default)]
struct Screen {
    entered: bool,
}

impl Screen {
    /// Marks the screen as held before `setup` runs, so a half-done setup is still undone.
    fn enter(&mut self, setup: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
        self.entered = true;
        setup()
    }

    /// Runs `teardown` if the screen is held. Returns whether it ran.
    fn leave(&mut self, teardown: impl FnOnce() -> io::Result<()>) -> io::Result<bool> {
        if !std::mem::take(&mut self.entered) {
            return Ok(false);
        }
        teardown()?;
        Ok(true)
    }
}

/// Ctrl+C, plus SIGTERM on unix. The handlers are installed on registration, not on
/// the first poll.
struct Interrupts {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    #[cfg(windows)]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl Interrupts {
    #[cfg(unix)]
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self { interrupt: signal(SignalKind::interrupt())?, terminate: signal(SignalKind::terminate())? })
    }

    #[cfg(windows)]
    fn register() -> io::Result<Self> {
        Ok(Self { ctrl_c: tokio::signal::windows::ctrl_c()? })
    }

    #[cfg(unix)]
    async fn recv(&mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {},
            _ = self.terminate.recv() => {},
        }
    }

    #[cfg(windows)]
    async fn recv(&mut self) {
        self.ctrl_c.recv().await;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let inner = centered(area, 9, 15);
        assert_eq!((inner.width, inner.height), (9, 15));
        assert!((35..=36).contains(&inner.x));
        assert!((4..=5).contains(&inner.y));
    }

    #[test]
    fn test_screen_restored_once() {
        let restores = Cell::new(0);
        let restore = || -> io::Result<()> {
            restores.set(restores.get() + 1);
            Ok(())
        };

        let mut screen = Screen::default();
        assert!(!screen.leave(restore).unwrap());

        screen.enter(|| Ok(())).unwrap();
        // Explicit exit, then the same call again from `Drop`.
        assert!(screen.leave(restore).unwrap());
        assert!(!screen.leave(restore).unwrap());
        assert_eq!(restores.get(), 1);
    }

    #[test]
    fn test_failed_enter_is_still_restored() {
        let restores = Cell::new(0);
        let mut screen = Screen::default();
        assert!(screen.enter(|| Err(io::Error::other("no tty"))).is_err());
        assert!(screen
            .leave(|| {
                restores.set(restores.get() + 1);
                Ok(())
            })
            .unwrap());
        assert_eq!(restores.get(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_interrupt_before_first_poll_is_caught() {
        let mut interrupts = Interrupts::register().unwrap();
        // Without a handler in place this would end the test process.
        unsafe { libc::raise(libc::SIGINT) };
        tokio::time::timeout(Duration::from_secs(5), interrupts.recv()).await.unwrap();
    }

    #[test]
    fn test_centered_clamps_to_small_screen() {
        let area = Rect::new(0, 0, 10, 5);
        let inner = centered(area, 35, 30);
        assert!(inner.width <= 10 && inner.height <= 5);
    }
}
