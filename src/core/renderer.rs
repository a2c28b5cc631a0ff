/// Generic game renderer trait, kept apart from game logic
use ratatui::Frame;

pub trait GameRenderer<State: ?Sized> {
    /// Draw `state` into the frame. Must not mutate anything.
    fn render(&self, frame: &mut Frame, state: &State);
}
