//! Network list panel
//!
//! Shows every pipe network discovered in the drawing; the selected one
//! drives the family grid on the right.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

#[derive(Default)]
pub struct NetworkListComponent {
    list_state: ListState,
}

impl NetworkListComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        networks: &[String],
        selected: Option<usize>,
    ) {
        self.list_state.select(selected);

        let items: Vec<ListItem> = networks
            .iter()
            .map(|name| ListItem::new(Line::from(Span::raw(name.clone()))))
            .collect();

        let title = format!(" Networks ({}) ", networks.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(Style::default().fg(Color::Cyan))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
