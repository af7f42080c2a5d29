use crate::pipeline::Report;
use crate::ui::{PerformanceChart, PerformanceTable, Sidebar, StatusBar};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const NO_DATA_WARNING: &str = "No data available for the selected pairs.";

pub struct LayoutManager {
    pub sidebar: Sidebar,
    pub table: PerformanceTable,
    pub chart: PerformanceChart,
    pub statusbar: StatusBar,
    pub day_start: Option<DateTime<Utc>>,
    pub has_report: bool,
}

impl LayoutManager {
    pub fn new(watchlist: Vec<String>, selected: Vec<bool>) -> Self {
        Self {
            sidebar: Sidebar::new(watchlist, selected),
            table: PerformanceTable::new(),
            chart: PerformanceChart::new(),
            statusbar: StatusBar::new(),
            day_start: None,
            has_report: false,
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.statusbar.loading = loading;
    }

    pub fn update_report(&mut self, report: Report) {
        self.day_start = Some(report.day_start);
        self.table.update(report.records.clone());
        self.chart.update(report.records);
        self.statusbar.failures = report.failures;
        self.statusbar.last_refresh = Some(report.finished_at);
        self.statusbar.loading = false;
        self.has_report = true;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title(frame, main_chunks[0]);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(40)])
            .split(main_chunks[1]);

        self.sidebar.render(frame, content_chunks[0]);
        self.render_results(frame, content_chunks[1]);
        self.statusbar.render(frame, main_chunks[2]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "Daily performance since 00:00 UTC",
            Style::default().fg(Color::White),
        )];
        if let Some(day) = self.day_start {
            spans.push(Span::styled(
                format!(" ({})", day.format("%Y-%m-%d")),
                Style::default().fg(Color::Gray),
            ));
        }

        let block = Block::default()
            .title(Span::styled(
                "Bybit Futures Dashboard",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let para = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(para, area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        if !self.has_report {
            self.render_notice(frame, area, "Loading...", Color::Gray);
            return;
        }

        if self.table.records.is_empty() {
            self.render_notice(frame, area, NO_DATA_WARNING, Color::Yellow);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.table.height().min(area.height / 2)),
                Constraint::Min(8),
            ])
            .split(area);

        self.table.render(frame, chunks[0]);
        self.chart.render(frame, chunks[1]);
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, message: &str, color: Color) {
        let block = Block::default()
            .title("Results")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let para = Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(
            para,
            Rect {
                y: inner.y + inner.height / 2,
                height: inner.height.min(1),
                ..inner
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PerformanceRecord;
    use crate::ui::test_util::buffer_lines;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, Terminal};

    fn manager() -> LayoutManager {
        LayoutManager::new(
            vec!["BTCUSDT".into(), "ETHUSDT".into(), "XRPUSDT".into()],
            vec![true, true, true],
        )
    }

    fn report(records: Vec<(&str, f64)>) -> Report {
        let day_start = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        Report {
            day_start,
            records: records
                .into_iter()
                .map(|(symbol, performance_pct)| PerformanceRecord {
                    symbol: symbol.to_string(),
                    performance_pct,
                })
                .collect(),
            skipped: vec![],
            failures: vec![],
            finished_at: day_start + chrono::Duration::hours(9),
        }
    }

    fn draw(layout: &LayoutManager) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| layout.render(f, f.area())).unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    #[test]
    fn shows_loading_before_first_report() {
        let lines = draw(&manager());
        assert!(lines[0].contains("Bybit Futures Dashboard"));
        assert!(lines.iter().any(|l| l.contains("Loading...")));
    }

    #[test]
    fn shows_table_and_chart_for_results() {
        let mut layout = manager();
        layout.update_report(report(vec![("BTCUSDT", 2.0), ("ETHUSDT", -2.0)]));
        let lines = draw(&layout);

        assert!(lines[1].contains("(2024-03-09)"));
        let btc_row = lines.iter().position(|l| l.contains("+2.00")).unwrap();
        let eth_row = lines.iter().position(|l| l.contains("-2.00")).unwrap();
        assert!(btc_row < eth_row);
        assert!(lines.iter().any(|l| l.contains("Variation (%)")));
        assert!(!lines.iter().any(|l| l.contains(NO_DATA_WARNING)));
        assert!(lines[29].contains("09:00:00 UTC"));
    }

    #[test]
    fn warns_when_nothing_has_data() {
        let mut layout = manager();
        layout.update_report(report(vec![]));
        let lines = draw(&layout);

        assert!(lines.iter().any(|l| l.contains(NO_DATA_WARNING)));
        assert!(!lines.iter().any(|l| l.contains("Variation (%)")));
        assert!(!lines.iter().any(|l| l.contains("Perf (%)")));
    }
}
