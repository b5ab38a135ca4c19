//! Terminal User Interface components for ergast-tui.

pub mod chart;
mod help;
pub mod tabs;
mod theme;
pub mod widgets;

pub use help::HelpOverlay;
pub use theme::Theme;
