use crate::Game;
use anyhow::{Context as _, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use std::time::Instant;
use tokio::time::MissedTickBehavior;

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Runs until the game asks to quit or the input stream closes, then
    /// hands the game back so the caller can inspect its final state.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.game.tick_rate());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();

        loop {
            terminal
                .draw(|f| self.game.render(f))
                .context("failed to draw frame")?;

            if self.game.should_quit() {
                break;
            }

            tokio::select! {
                // INPUT
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.game.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("failed to read terminal event"),
                    None => {
                        tracing::warn!("terminal event stream closed");
                        break;
                    }
                },

                // TICK
                _ = ticker.tick() => {
                    let dt = last_tick.elapsed();
                    last_tick = Instant::now();
                    self.game.on_tick(dt);
                }
            }
        }

        Ok(self.game)
    }
}
