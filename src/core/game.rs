/// Core interface between a game and the terminal frame loop
use std::time::Duration;

use crossterm::event::KeyEvent;

/// A game driven by [`Engine`](crate::core::engine::Engine).
///
/// Every callback runs to completion before the next event is processed, so
/// implementations never see concurrent calls.
pub trait Game {
    /// How often `on_tick` fires. Presentation timers hang off this.
    fn tick_rate(&self) -> Duration {
        Duration::from_millis(50)
    }

    /// Advance presentation timers by `dt`
    fn on_tick(&mut self, dt: Duration);

    /// A key was pressed
    fn handle_key(&mut self, key: KeyEvent);

    /// Draw the current state into the Ratatui frame
    fn render(&self, frame: &mut ratatui::Frame);

    /// The loop stops after the frame in which this turns true
    fn should_quit(&self) -> bool;
}
