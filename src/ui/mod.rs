pub mod chart;
pub mod layout;
pub mod sidebar;
pub mod statusbar;
pub mod table;

use ratatui::style::Color;

pub use chart::PerformanceChart;
pub use layout::LayoutManager;
pub use sidebar::Sidebar;
pub use statusbar::StatusBar;
pub use table::PerformanceTable;

pub const GAIN: Color = Color::Rgb(0x16, 0xa3, 0x4a);
pub const LOSS: Color = Color::Rgb(0xdc, 0x26, 0x26);

/// Green strictly above zero, red otherwise.
pub fn bar_color(performance_pct: f64) -> Color {
    if performance_pct > 0.0 {
        GAIN
    } else {
        LOSS
    }
}
