use crate::pipeline::SymbolFailure;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub struct StatusBar {
    pub loading: bool,
    pub last_refresh: Option<DateTime<Utc>>,
    pub failures: Vec<SymbolFailure>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            loading: false,
            last_refresh: None,
            failures: Vec::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (status_color, status_text) = if self.loading {
            (Color::Yellow, "● LOADING".to_string())
        } else if let Some(at) = self.last_refresh {
            (Color::Green, format!("● {} UTC", at.format("%H:%M:%S")))
        } else {
            (Color::Gray, "○ idle".to_string())
        };

        let mut spans = vec![
            Span::styled(status_text, Style::default().fg(status_color)),
            Span::raw(" | "),
        ];

        if let Some(first) = self.failures.first() {
            spans.push(Span::styled(
                format!(
                    "{} failed ({}: {}) ",
                    self.failures.len(),
                    first.symbol,
                    first.message
                ),
                Style::default().fg(Color::Red),
            ));
            spans.push(Span::raw("| "));
        }

        spans.extend([
            Span::styled("Q", Style::default().fg(Color::Yellow)),
            Span::raw(":Quit "),
            Span::styled("↑↓", Style::default().fg(Color::Yellow)),
            Span::raw(":Nav "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(":Toggle "),
            Span::styled("A/N", Style::default().fg(Color::Yellow)),
            Span::raw(":All/None "),
            Span::styled("R", Style::default().fg(Color::Yellow)),
            Span::raw(":Refresh"),
        ]);

        let para = Paragraph::new(Line::from(spans)).block(Block::default());
        frame.render_widget(para, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::buffer_lines;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(bar: &StatusBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        buffer_lines(terminal.backend().buffer()).remove(0)
    }

    #[test]
    fn shows_refresh_time() {
        let mut bar = StatusBar::new();
        bar.last_refresh = Some(Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 9).unwrap());
        let line = draw(&bar);
        assert!(line.contains("14:05:09 UTC"));
        assert!(line.contains(":Refresh"));
    }

    #[test]
    fn shows_first_failure() {
        let mut bar = StatusBar::new();
        bar.failures = vec![
            SymbolFailure {
                symbol: "ETHUSDT".to_string(),
                message: "unexpected HTTP status 502".to_string(),
            },
            SymbolFailure {
                symbol: "XRPUSDT".to_string(),
                message: "first open price is zero".to_string(),
            },
        ];
        let line = draw(&bar);
        assert!(line.contains("2 failed (ETHUSDT: unexpected HTTP status 502)"));
    }

    #[test]
    fn loading_wins_over_refresh_time() {
        let mut bar = StatusBar::new();
        bar.loading = true;
        bar.last_refresh = Some(Utc::now());
        assert!(draw(&bar).contains("LOADING"));
    }
}
