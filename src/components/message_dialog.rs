//! Message dialog component
//!
//! Blocking informational or error dialog. Dismissing a fatal dialog closes
//! the application; the app decides that based on the modal it pops.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::modal::Severity;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct MessageDialog {
    title: String,
    body: String,
    severity: Option<Severity>,
}

impl MessageDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, title: &str, body: &str, severity: Severity) {
        self.title = title.to_string();
        self.body = body.to_string();
        self.severity = Some(severity);
    }
}

impl Component for MessageDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let color = match self.severity {
            Some(Severity::Error) => Color::Red,
            _ => Color::Cyan,
        };

        let body_lines = self.body.lines().count() as u16;
        let popup_area = centered_popup(area, 60, (body_lines + 6).max(7).min(area.height));

        frame.render_widget(Clear, popup_area);

        let mut content = vec![Line::from("")];
        for line in self.body.lines() {
            content.push(Line::from(line.to_string()));
        }
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            " Enter/Esc  Dismiss",
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", self.title))
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_draw_fits_short_terminal() {
        let mut dialog = MessageDialog::new();
        dialog.show("Error", "something went wrong", Severity::Error);

        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| dialog.draw(frame, frame.area()).unwrap())
            .unwrap();
    }

    #[test]
    fn test_draw_multi_line_body() {
        let mut dialog = MessageDialog::new();
        dialog.show("Info", "line one\nline two\nline three", Severity::Info);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| dialog.draw(frame, frame.area()).unwrap())
            .unwrap();
    }
}
