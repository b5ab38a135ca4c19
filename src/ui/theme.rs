//! Theme configuration for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub border: Color,
    pub title: Color,
    pub outcome_finished: Color,
    pub outcome_lapped: Color,
    pub outcome_retired: Color,
    pub chart_colors: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            bg: Color::Reset,
            fg: Color::White,
            highlight_bg: Color::Rgb(60, 60, 80),
            highlight_fg: Color::White,
            border: Color::Rgb(100, 100, 120),
            title: Color::Cyan,
            outcome_finished: Color::Green,
            outcome_lapped: Color::Blue,
            outcome_retired: Color::Red,
            // Named colors render on terminals without truecolor
            chart_colors: vec![
                Color::Red,
                Color::Green,
                Color::Yellow,
                Color::Blue,
                Color::Magenta,
                Color::Cyan,
                Color::LightRed,
                Color::LightGreen,
            ],
        }
    }
}

impl Theme {
    /// Base surface style used to paint widget backgrounds
    pub fn surface_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Convenience helper returning (border_style, title_style) for focus state
    pub fn panel_styles(&self, focused: bool) -> (Style, Style) {
        if focused {
            (self.focused_border_style(), self.focused_border_style())
        } else {
            (self.border_style(), self.dimmed_title_style())
        }
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for focused panel borders (distinct from normal borders)
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for unfocused/dimmed titles
    pub fn dimmed_title_style(&self) -> Style {
        Style::default()
            .fg(self.border)
            .add_modifier(Modifier::DIM)
    }

    /// Style for a race outcome, keyed on the status text
    pub fn outcome_style(&self, status: &str) -> Style {
        let color = if status == "Finished" {
            self.outcome_finished
        } else if status.starts_with('+') {
            // "+1 Lap", "+2 Laps": classified but lapped
            self.outcome_lapped
        } else if status.is_empty() {
            self.fg
        } else {
            self.outcome_retired
        };
        Style::default().fg(color)
    }

    /// Get a chart color by index (cycles through available colors)
    pub fn chart_color(&self, index: usize) -> Color {
        self.chart_colors[index % self.chart_colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_color_cycles() {
        let theme = Theme::default();
        let len = theme.chart_colors.len();
        assert_eq!(theme.chart_color(0), theme.chart_color(len));
        assert_eq!(theme.chart_color(1), theme.chart_color(len + 1));
    }

    #[test]
    fn test_outcome_styles() {
        let theme = Theme::default();
        assert_eq!(
            theme.outcome_style("Finished"),
            Style::default().fg(theme.outcome_finished)
        );
        assert_eq!(
            theme.outcome_style("+1 Lap"),
            Style::default().fg(theme.outcome_lapped)
        );
        assert_eq!(
            theme.outcome_style("Engine"),
            Style::default().fg(theme.outcome_retired)
        );
    }
}
