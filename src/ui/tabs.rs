//! Tab bar listing the dashboard views.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme::Theme;
use crate::views::View;

/// Hotkey shown for the tab at `index` ("1".."9", then "0")
pub fn hotkey(index: usize) -> Option<char> {
    match index {
        0..=8 => char::from_digit(index as u32 + 1, 10),
        9 => Some('0'),
        _ => None,
    }
}

/// Tab index selected by a hotkey, the inverse of [`hotkey`]
pub fn tab_for_key(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        0 => Some(9),
        n => Some(n as usize - 1),
    }
}

/// One-line view selector
pub struct ViewTabs<'a> {
    selected: View,
    theme: &'a Theme,
}

impl<'a> ViewTabs<'a> {
    pub fn new(selected: View, theme: &'a Theme) -> Self {
        ViewTabs { selected, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spans: Vec<Span> = View::TABS
            .iter()
            .enumerate()
            .flat_map(|(i, view)| {
                let key = hotkey(i)
                    .map(|k| format!("[{k}] "))
                    .unwrap_or_else(|| "    ".to_string());
                let style = if *view == self.selected {
                    self.theme.highlight_style()
                } else {
                    self.theme.normal_style()
                };
                vec![
                    Span::styled(key, Style::default().add_modifier(Modifier::DIM)),
                    Span::styled(format!("{}  ", view.tab_label()), style),
                ]
            })
            .collect();

        let paragraph = Paragraph::new(Line::from(spans)).style(self.theme.normal_style());
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotkeys_round_trip() {
        for i in 0..10 {
            let key = hotkey(i).unwrap();
            assert_eq!(tab_for_key(key), Some(i));
        }
        assert_eq!(hotkey(10), None);
        assert_eq!(tab_for_key('x'), None);
    }
}
