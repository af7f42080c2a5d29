use crate::data::PerformanceRecord;
use crate::ui::bar_color;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

#[derive(Debug, Clone, Default)]
pub struct PerformanceTable {
    pub records: Vec<PerformanceRecord>,
}

impl PerformanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, records: Vec<PerformanceRecord>) {
        self.records = records;
    }

    /// Rows plus borders and header.
    pub fn height(&self) -> u16 {
        self.records.len() as u16 + 3
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec!["#", "Symbol", "Perf (%)"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .records
            .iter()
            .enumerate()
            .map(|(rank, record)| {
                Row::new(vec![
                    Cell::from(Span::styled(
                        (rank + 1).to_string(),
                        Style::default().fg(Color::Gray),
                    )),
                    Cell::from(Span::styled(
                        record.symbol.clone(),
                        Style::default().fg(Color::White),
                    )),
                    Cell::from(Span::styled(
                        format!("{:>+9.2}", record.performance_pct),
                        Style::default().fg(bar_color(record.performance_pct)),
                    )),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(12),
                Constraint::Min(9),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title("Daily performance since 00:00 UTC")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );

        frame.render_widget(table, area);
    }
}
