//! Sidebar selector lists and the status bar.

use ratatui::{
    layout::Rect,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::theme::Theme;

/// A titled, selectable list used for the season, race and driver filters
pub struct SelectorList<'a> {
    title: &'a str,
    items: &'a [String],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> SelectorList<'a> {
    pub fn new(title: &'a str, items: &'a [String], selected: usize, theme: &'a Theme) -> Self {
        SelectorList {
            title,
            items,
            selected,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|label| ListItem::new(label.as_str()))
            .collect();

        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(format!(" {} ({}) ", self.title, self.items.len()))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .title_style(title_style);

        let list = List::new(items)
            .block(block)
            .style(self.theme.normal_style())
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    context: Option<&'a str>,
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(context: Option<&'a str>, error: Option<&'a str>, theme: &'a Theme) -> Self {
        StatusBar {
            context,
            error,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text = if let Some(e) = self.error {
            format!("Error: {e}")
        } else {
            match self.context {
                Some(c) => format!("ergast-tui: {c} | [h] Help [q] Quit"),
                None => "ergast-tui | [h] Help [q] Quit".to_string(),
            }
        };

        let paragraph = Paragraph::new(text)
            .style(self.theme.normal_style())
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(self.theme.border_style()),
            );

        frame.render_widget(paragraph, area);
    }
}
