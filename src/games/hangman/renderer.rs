/// Hangman-specific renderer: reads the view, never mutates it
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::renderer::GameRenderer;
use crate::games::hangman::art;
use crate::games::hangman::random::IndexSource;
use crate::games::hangman::view::{
    key_letter, HangmanView, KeyStatus, ResultPanel, KEYBOARD_COLUMNS,
};

pub struct HangmanRenderer;

impl<S: IndexSource> GameRenderer<HangmanView<S>> for HangmanRenderer {
    fn render(&self, frame: &mut Frame, view: &HangmanView<S>) {
        let [title, body, keyboard, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        let title_block = Paragraph::new("HANGMAN")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title_block, title);

        let [gallows, info] =
            Layout::horizontal([Constraint::Length(16), Constraint::Min(20)]).areas(body);
        render_gallows(frame, gallows, view);
        render_info(frame, info, view);
        render_keyboard(frame, keyboard, view);

        let help = "Esc: quit  Ctrl+R: new word";
        frame.render_widget(
            Paragraph::new(view.message())
                .block(Block::default().borders(Borders::ALL).title_bottom(help)),
            status,
        );

        if let ResultPanel::Shown(ended) = view.panel() {
            let (title, lead, color) = if ended.is_victory {
                ("Congratulations!", "You found the word:", Color::Green)
            } else {
                ("Game Over", "The correct word was:", Color::Red)
            };
            let text = vec![
                Line::from(""),
                Line::from(lead),
                Line::from(Span::styled(
                    ended.secret_word.to_uppercase(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press Enter to play again"),
            ];
            let area = centered_rect(frame.area(), 40, 9);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(text).alignment(Alignment::Center).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_style(Style::default().fg(color)),
                ),
                area,
            );
        }
    }
}

fn render_gallows<S: IndexSource>(frame: &mut Frame, area: Rect, view: &HangmanView<S>) {
    let state = view.engine().state();
    let mut style = Style::default();
    let mut drawing = art::stage(state.wrong_guess_count()).to_string();
    if view.is_shaking() {
        style = style.fg(Color::Red);
        drawing = drawing.lines().map(|l| format!(" {l}")).collect::<Vec<_>>().join("\n");
    }
    frame.render_widget(
        Paragraph::new(drawing)
            .style(style)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_info<S: IndexSource>(frame: &mut Frame, area: Rect, view: &HangmanView<S>) {
    let engine = view.engine();
    let state = engine.state();

    let word: String = state
        .masked_word()
        .iter()
        .map(|slot| slot.map_or('_', |c| c.to_ascii_uppercase()))
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ");

    let wrong: String = state.wrong_letters().map(|c| c.to_ascii_uppercase()).collect();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(word, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![Span::raw("Hint: "), Span::styled(engine.hint(), Style::default().fg(Color::Cyan))]),
        Line::from(vec![
            Span::raw("Incorrect guesses: "),
            Span::styled(
                format!("{} / {}", state.wrong_guess_count(), state.max_wrong_guesses()),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(format!("Missed: {wrong}")),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_keyboard<S: IndexSource>(frame: &mut Frame, area: Rect, view: &HangmanView<S>) {
    let lines: Vec<Line> = (0..26)
        .collect::<Vec<usize>>()
        .chunks(KEYBOARD_COLUMNS)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&i| {
                    let c = key_letter(i);
                    let mut style = match view.key_status(c) {
                        KeyStatus::Unused => Style::default().fg(Color::Blue),
                        KeyStatus::Hit => Style::default().fg(Color::Green),
                        KeyStatus::Miss => Style::default().fg(Color::Red),
                        KeyStatus::Disabled => Style::default().fg(Color::DarkGray),
                    };
                    if view.key_status(c) != KeyStatus::Unused {
                        style = style.add_modifier(Modifier::DIM);
                    }
                    if i == view.cursor() {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!(" {} ", c.to_ascii_uppercase()), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::Game;
    use crate::games::hangman::catalog::{WordCatalog, WordEntry};
    use crate::games::hangman::game::{HangmanEngine, Letter};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    struct First;

    impl IndexSource for First {
        fn next_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn screen<S: IndexSource>(view: &HangmanView<S>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|f| view.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn view() -> HangmanView<First> {
        let catalog = WordCatalog::new(vec![WordEntry::new("cat", "meows").unwrap()]);
        HangmanView::new(HangmanEngine::new(catalog, First), Duration::ZERO)
    }

    #[test]
    fn draws_masked_word_hint_and_counter() {
        let mut v = view();
        v.submit(Letter::new('a').unwrap());
        v.submit(Letter::new('q').unwrap());

        let out = screen(&v);
        assert!(out.contains("_ A _"));
        assert!(out.contains("Hint: meows"));
        assert!(out.contains("Incorrect guesses: 1 / 6"));
        assert!(out.contains("Missed: Q"));
        assert!(out.contains("  O"));
    }

    #[test]
    fn draws_result_panel() {
        let mut v = view();
        for c in ['c', 'a', 't'] {
            v.submit(Letter::new(c).unwrap());
        }
        let out = screen(&v);
        assert!(out.contains("Congratulations!"));
        assert!(out.contains("CAT"));
    }
}
