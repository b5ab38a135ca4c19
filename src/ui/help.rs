//! Key bindings overlay.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::tabs::hotkey;
use super::theme::Theme;
use crate::views::View;

const INTRO: &str = "Seasons, races and drivers on the left filter the view on the right.";

const FILTER_KEYS: [(&str, &str); 6] = [
    ("j / Down", "Next entry"),
    ("k / Up", "Previous entry"),
    ("Enter / l", "Narrow to the next filter"),
    ("Esc", "Back to the previous filter"),
    ("Tab", "Focus next panel"),
    ("Shift+Tab", "Focus previous panel"),
];

const GENERAL_KEYS: [(&str, &str); 4] = [
    ("[ / ]", "Previous / next view"),
    ("Left / Right", "Previous / next view (view panel)"),
    ("h / ? / F1", "Toggle this help"),
    ("q", "Quit"),
];

pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        HelpOverlay { theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(65, 85, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title_style(self.theme.title_style())
            .style(self.theme.surface_style());

        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .style(self.theme.surface_style());

        frame.render_widget(paragraph, popup_area);
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                INTRO,
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];

        let owned = |&(k, d): &(&'static str, &'static str)| (k.to_string(), d);
        self.push_section(&mut lines, "Filters", FILTER_KEYS.iter().map(owned));
        self.push_section(&mut lines, "Views", view_keys());
        self.push_section(&mut lines, "General", GENERAL_KEYS.iter().map(owned));

        lines.push(Line::from(vec![
            Span::styled("Finished", self.theme.outcome_style("Finished")),
            Span::raw("  "),
            Span::styled("+1 Lap", self.theme.outcome_style("+1 Lap")),
            Span::raw("  "),
            Span::styled("Retired", self.theme.outcome_style("Accident")),
        ]));
        lines
    }

    fn push_section(
        &self,
        lines: &mut Vec<Line<'static>>,
        heading: &'static str,
        keys: impl Iterator<Item = (String, &'static str)>,
    ) {
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {key:<14}"),
                    Style::default().fg(self.theme.title),
                ),
                Span::raw(desc),
            ]));
        }
        lines.push(Line::from(""));
    }
}

/// One entry per dashboard tab, keyed by its digit
fn view_keys() -> impl Iterator<Item = (String, &'static str)> {
    View::TABS.iter().enumerate().map(|(i, view)| {
        let key = hotkey(i).map(String::from).unwrap_or_else(|| "]".to_string());
        (key, view.title())
    })
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 80, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 40);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 5);
    }

    #[test]
    fn test_every_tab_is_listed() {
        let keys: Vec<(String, &str)> = view_keys().collect();
        assert_eq!(keys.len(), View::TABS.len());
        assert_eq!(keys[0], ("1".to_string(), "Drivers' Championship"));
        assert_eq!(keys[9], ("0".to_string(), "Races by Country"));
        // Past the digit keys the tab is reached by cycling
        assert_eq!(keys[10], ("]".to_string(), "Circuit Map"));
    }

    #[test]
    fn test_lines_cover_views_and_outcomes() {
        let theme = Theme::default();
        let text: Vec<String> = HelpOverlay::new(&theme)
            .lines()
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert!(text.iter().any(|l| l.contains("Circuit Map")));
        assert!(text.iter().any(|l| l.contains("Finished")));
    }
}
