use crate::data::PerformanceRecord;
use crate::ui::bar_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

// Columns reserved on the left for the y-axis ticks.
const GUTTER: u16 = 10;

/// Vertical bar chart of daily performance, bars hanging off a zero line.
#[derive(Debug, Clone, Default)]
pub struct PerformanceChart {
    pub records: Vec<PerformanceRecord>,
}

impl PerformanceChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, records: Vec<PerformanceRecord>) {
        self.records = records;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Performance (%) since 00:00 UTC")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(2),
                Constraint::Length(1),
            ])
            .split(inner);

        let axis_label = Paragraph::new(Line::from(Span::styled(
            "Variation (%)",
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(axis_label, vertical[0]);

        self.render_bars(frame, vertical[1], vertical[2]);
    }

    fn render_bars(&self, frame: &mut Frame, plot: Rect, labels: Rect) {
        if self.records.is_empty() || plot.width <= GUTTER || plot.height < 2 {
            return;
        }

        let (min_value, max_value) = self.records.iter().fold((0.0f64, 0.0f64), |(lo, hi), r| {
            (lo.min(r.performance_pct), hi.max(r.performance_pct))
        });
        let value_range = (max_value - min_value).max(0.0001);
        let last_row = plot.height - 1;
        let row_of = |value: f64| {
            plot.y + ((max_value - value) / value_range * last_row as f64).round() as u16
        };
        let zero_y = row_of(0.0);

        let bars_x = plot.x + GUTTER;
        let bars_end = plot.x + plot.width;
        let slot = ((bars_end - bars_x) / self.records.len() as u16).max(1);
        let bar_width = if slot >= 3 { slot - 1 } else { slot };

        for x in bars_x..bars_end {
            frame.buffer_mut()[(x, zero_y)]
                .set_char('─')
                .set_fg(Color::White);
        }

        for (idx, record) in self.records.iter().enumerate() {
            let x0 = bars_x + idx as u16 * slot;
            if x0 >= bars_end {
                break;
            }
            let x1 = (x0 + bar_width).min(bars_end);

            let value_y = row_of(record.performance_pct);
            let color = bar_color(record.performance_pct);
            for x in x0..x1 {
                for y in value_y.min(zero_y)..=value_y.max(zero_y) {
                    frame.buffer_mut()[(x, y)].set_char('█').set_fg(color);
                }
            }

            if labels.height > 0 {
                frame.buffer_mut().set_stringn(
                    x0,
                    labels.y,
                    &record.symbol,
                    (x1 - x0) as usize,
                    Style::default().fg(Color::Gray),
                );
            }
        }

        for (value, y) in [
            (max_value, plot.y),
            (0.0, zero_y),
            (min_value, plot.y + last_row),
        ] {
            let tick = format!("{:>8.2} ┤", value);
            frame.buffer_mut().set_stringn(
                plot.x,
                y,
                tick,
                GUTTER as usize,
                Style::default().fg(Color::Gray),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::buffer_lines;
    use crate::ui::{GAIN, LOSS};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn record(symbol: &str, pct: f64) -> PerformanceRecord {
        PerformanceRecord {
            symbol: symbol.to_string(),
            performance_pct: pct,
        }
    }

    fn draw(chart: &PerformanceChart, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| chart.render(f, f.area())).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Columns holding bar cells of the given color.
    fn bar_columns(buf: &Buffer, color: Color) -> Vec<u16> {
        let area = buf.area;
        let mut cols: Vec<u16> = (area.y..area.y + area.height)
            .flat_map(|y| (area.x..area.x + area.width).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].symbol() == "█" && buf[(x, y)].fg == color)
            .map(|(x, _)| x)
            .collect();
        cols.sort_unstable();
        cols.dedup();
        cols
    }

    #[test]
    fn gains_are_green_and_losses_red() {
        let mut chart = PerformanceChart::new();
        chart.update(vec![record("BTCUSDT", 2.0), record("ETHUSDT", -2.0)]);
        let buf = draw(&chart, 60, 16);

        let green = bar_columns(&buf, GAIN);
        let red = bar_columns(&buf, LOSS);
        assert!(!green.is_empty());
        assert!(!red.is_empty());
        assert!(green.iter().max() < red.iter().min());
    }

    #[test]
    fn zero_performance_is_drawn_red() {
        let mut chart = PerformanceChart::new();
        chart.update(vec![record("SOLUSDT", 0.0)]);
        let buf = draw(&chart, 40, 12);

        assert!(bar_columns(&buf, GAIN).is_empty());
        assert!(!bar_columns(&buf, LOSS).is_empty());
    }

    #[test]
    fn draws_axis_label_zero_line_and_symbols() {
        let mut chart = PerformanceChart::new();
        chart.update(vec![record("BTCUSDT", 3.0), record("XRPUSDT", -1.0)]);
        let lines = buffer_lines(&draw(&chart, 60, 16));

        assert!(lines[0].contains("Performance (%) since 00:00 UTC"));
        assert!(lines.iter().any(|l| l.contains("Variation (%)")));
        assert!(lines.iter().any(|l| l.contains("0.00 ┤") && l.contains('─')));
        assert!(lines.iter().any(|l| l.contains("BTCUSDT") && l.contains("XRPUSDT")));
        assert!(lines.iter().any(|l| l.contains("3.00 ┤")));
        assert!(lines.iter().any(|l| l.contains("-1.00 ┤")));
    }

    #[test]
    fn empty_chart_draws_only_frame() {
        let buf = draw(&PerformanceChart::new(), 40, 12);
        assert!(bar_columns(&buf, GAIN).is_empty());
        assert!(bar_columns(&buf, LOSS).is_empty());
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let mut chart = PerformanceChart::new();
        chart.update(vec![record("BTCUSDT", 1.0), record("ETHUSDT", -1.0)]);
        draw(&chart, 8, 4);
        draw(&chart, 12, 5);
        draw(&chart, 14, 5);
    }
}
