use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Multi-select list of the watched pairs.
#[derive(Debug, Clone)]
pub struct Sidebar {
    pub symbols: Vec<String>,
    pub selected: Vec<bool>,
    pub cursor: usize,
}

impl Sidebar {
    pub fn new(symbols: Vec<String>, selected: Vec<bool>) -> Self {
        let mut selected = selected;
        selected.resize(symbols.len(), true);
        Self {
            symbols,
            selected,
            cursor: 0,
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.symbols.len() {
            self.cursor += 1;
        }
    }

    /// Flips the entry under the cursor. Returns false when the list is empty.
    pub fn toggle(&mut self) -> bool {
        match self.selected.get_mut(self.cursor) {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    /// Sets every entry to `on`. Returns whether anything changed.
    pub fn set_all(&mut self, on: bool) -> bool {
        let changed = self.selected.iter().any(|flag| *flag != on);
        self.selected.iter_mut().for_each(|flag| *flag = on);
        changed
    }

    pub fn selected_symbols(&self) -> Vec<String> {
        self.symbols
            .iter()
            .zip(&self.selected)
            .filter(|(_, on)| **on)
            .map(|(s, _)| s.clone())
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let header = Paragraph::new(Line::from(Span::styled(
            "Select pairs to display:",
            Style::default().fg(Color::Gray),
        )))
        .block(
            Block::default()
                .title("Options")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        frame.render_widget(header, vertical[0]);

        let items: Vec<ListItem> = self
            .symbols
            .iter()
            .zip(&self.selected)
            .enumerate()
            .map(|(idx, (symbol, on))| {
                let mark = if *on { "[x]" } else { "[ ]" };
                let style = if idx == self.cursor {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if *on {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Line::from(Span::styled(format!("{} {}", mark, symbol), style)))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        // Scrolls the list so the cursor row stays on screen.
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, vertical[1], &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::buffer_lines;
    use ratatui::{backend::TestBackend, Terminal};

    fn sidebar() -> Sidebar {
        Sidebar::new(
            vec!["BTCUSDT".into(), "ETHUSDT".into(), "SOLUSDT".into()],
            vec![true, true, true],
        )
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut s = sidebar();
        s.move_up();
        assert_eq!(s.cursor, 0);
        s.move_down();
        s.move_down();
        s.move_down();
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn toggle_filters_selection() {
        let mut s = sidebar();
        s.move_down();
        assert!(s.toggle());
        assert_eq!(s.selected_symbols(), ["BTCUSDT", "SOLUSDT"]);
        assert!(s.toggle());
        assert_eq!(s.selected_symbols(), ["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    }

    #[test]
    fn set_all_reports_changes() {
        let mut s = sidebar();
        assert!(!s.set_all(true));
        assert!(s.set_all(false));
        assert!(s.selected_symbols().is_empty());
    }

    #[test]
    fn empty_list_cannot_toggle() {
        let mut s = Sidebar::new(vec![], vec![]);
        assert!(!s.toggle());
        s.move_down();
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn long_watchlist_keeps_cursor_visible() {
        let symbols: Vec<String> = (0..12).map(|i| format!("PAIR{i:02}USDT")).collect();
        let mut s = Sidebar::new(symbols, vec![true; 12]);
        for _ in 0..11 {
            s.move_down();
        }
        s.toggle();

        let mut terminal = Terminal::new(TestBackend::new(28, 8)).unwrap();
        terminal.draw(|f| s.render(f, f.area())).unwrap();
        let lines = buffer_lines(terminal.backend().buffer());

        assert!(lines.iter().any(|l| l.contains("[ ] PAIR11USDT")));
        assert!(!lines.iter().any(|l| l.contains("PAIR00USDT")));
    }

    #[test]
    fn renders_checkboxes() {
        let mut s = sidebar();
        s.move_down();
        s.toggle();

        let mut terminal = Terminal::new(TestBackend::new(28, 8)).unwrap();
        terminal.draw(|f| s.render(f, f.area())).unwrap();
        let lines = buffer_lines(terminal.backend().buffer());

        assert!(lines[0].contains("Options"));
        assert!(lines[1].contains("Select pairs"));
        assert!(lines[4].contains("[x] BTCUSDT"));
        assert!(lines[5].contains("[ ] ETHUSDT"));
        assert!(lines[6].contains("[x] SOLUSDT"));
    }
}
