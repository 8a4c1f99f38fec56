//! Style picker dialog
//!
//! Modal list used for both selectors on a family row: picking the new style
//! to apply, and resolving which current style a replace or delete should
//! target.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct StylePickerComponent {
    title: String,
    options: Vec<String>,
    selected: usize,
    list_state: ListState,
}

impl Default for StylePickerComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl StylePickerComponent {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            options: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Prepare the picker with options, pre-selecting `current` when present.
    pub fn open(&mut self, title: &str, options: &[String], current: Option<&str>) {
        self.title = title.to_string();
        self.options = options.to_vec();
        self.selected = current
            .and_then(|c| self.options.iter().position(|o| o == c))
            .unwrap_or(0);
        self.list_state.select(Some(self.selected));
    }

    /// The option the user has highlighted.
    pub fn chosen(&self) -> Option<&str> {
        self.options.get(self.selected).map(|s| s.as_str())
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.options.len() {
            self.selected += 1;
            self.list_state.select(Some(self.selected));
        }
    }

    fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.list_state.select(Some(self.selected));
        }
    }
}

impl Component for StylePickerComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = (self.options.len() as u16 + 5).min(area.height.saturating_sub(4));
        let popup_area = centered_popup(area, 50, height.max(7));

        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|o| ListItem::new(Line::from(Span::raw(o.clone()))))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let inner = Rect {
            x: popup_area.x,
            y: popup_area.y,
            width: popup_area.width,
            height: popup_area.height.saturating_sub(3),
        };
        frame.render_stateful_widget(list, inner, &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        let help_area = Rect {
            x: popup_area.x,
            y: popup_area.y + popup_area.height.saturating_sub(3),
            width: popup_area.width,
            height: 3.min(popup_area.height),
        };
        frame.render_widget(help, help_area);

        Ok(())
    }
}
