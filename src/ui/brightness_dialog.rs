// ui/brightness_dialog.rs

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::*,
};

use super::{Component, utils::center_rect};
use crate::{
    app::Action,
    dialog::{BrightnessDialog, CloseRequest, Focus, LabeledSpinner},
};

const HINT: &str = "Tab: next  ↑↓: adjust  Enter: confirm  Esc: close";
const FIELD_WIDTH: u16 = 12;
const POPUP_HEIGHT: u16 = 8;

// Outer size of the dialog popup, borders included.
pub fn popup_size(dialog: &BrightnessDialog) -> (u16, u16) {
    let label_width = dialog
        .maitai
        .label
        .chars()
        .count()
        .max(dialog.chameleon.label.chars().count()) as u16;
    let form_width = 2 + label_width + 2 + FIELD_WIDTH + 2;
    let hint_width = HINT.chars().count() as u16 + 2;
    let title_width = dialog.title.chars().count() as u16 + 4;
    let width = form_width.max(hint_width).max(title_width) + 2;
    (width, POPUP_HEIGHT)
}

impl Component for BrightnessDialog {
    fn on_key(&mut self, key: KeyEvent) -> Option<Action> {
        if !self.is_open() {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return self.close_action();
        }
        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                None
            }
            KeyCode::BackTab => {
                self.focus_previous();
                None
            }
            KeyCode::Esc => {
                // Esc first abandons typing, then closes.
                if let Some(spinner) = self.focused_spinner_mut().filter(|s| s.is_editing()) {
                    spinner.cancel_edit();
                    return None;
                }
                self.close_action()
            }
            KeyCode::Enter => match self.focus() {
                Focus::Confirm => self.confirm().then_some(Action::Hide),
                Focus::MaiTai | Focus::Chameleon => {
                    if let Some(spinner) = self.focused_spinner_mut() {
                        spinner.commit_edit();
                    }
                    None
                }
            },
            KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') => {
                if let Some(spinner) = self.focused_spinner_mut() {
                    spinner.commit_edit();
                    spinner.increment();
                }
                None
            }
            KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') => {
                if let Some(spinner) = self.focused_spinner_mut() {
                    spinner.commit_edit();
                    spinner.decrement();
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(spinner) = self.focused_spinner_mut() {
                    spinner.backspace();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(spinner) = self.focused_spinner_mut() {
                    spinner.push_char(c);
                }
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer) {
        let (width, height) = popup_size(self);
        if area.width < width || area.height < height {
            let warning = Paragraph::new("Terminal too small. Please resize.")
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            warning.render(area, buffer);
            return;
        }

        let popup = center_rect(area, Constraint::Length(width), Constraint::Length(height));
        Clear.render(popup, buffer);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border)
            .title(Span::styled(format!(" {} ", self.title), self.theme.title))
            .title_alignment(Alignment::Center);
        let inner = block.inner(popup);
        block.render(popup, buffer);

        let [_, maitai_row, chameleon_row, _, button_row, hint_row] =
            Layout::vertical([Constraint::Length(1); 6]).areas(inner);

        let label_width = (width as usize).saturating_sub(FIELD_WIDTH as usize + 8);
        self.spinner_line(&self.maitai, Focus::MaiTai, label_width)
            .render(maitai_row.inner(Margin::new(2, 0)), buffer);
        self.spinner_line(&self.chameleon, Focus::Chameleon, label_width)
            .render(chameleon_row.inner(Margin::new(2, 0)), buffer);

        let button_style = if self.focus() == Focus::Confirm {
            self.theme.button_focused
        } else {
            self.theme.button
        };
        Paragraph::new(Span::styled(
            format!("[ {} ]", self.confirm_label),
            button_style,
        ))
        .alignment(Alignment::Right)
        .render(button_row.inner(Margin::new(2, 0)), buffer);

        Paragraph::new(HINT)
            .style(self.theme.hint)
            .alignment(Alignment::Center)
            .render(hint_row, buffer);
    }
}

impl BrightnessDialog {
    fn close_action(&mut self) -> Option<Action> {
        match self.request_close() {
            CloseRequest::Hide => Some(Action::Hide),
            CloseRequest::ExitProcess => Some(Action::ExitProcess),
            CloseRequest::Ignored => None,
        }
    }

    fn spinner_line(&self, input: &LabeledSpinner, focus: Focus, label_width: usize) -> Line<'static> {
        let is_focused = self.focus() == focus;
        let label_style = if is_focused {
            self.theme.focused
        } else {
            self.theme.label
        };
        let field_style = match (is_focused, input.spinner.is_editing()) {
            (true, true) => self.theme.editing,
            (true, false) => self.theme.focused,
            (false, _) => self.theme.value,
        };
        Line::from(vec![
            Span::styled(format!("{:<label_width$}", input.label), label_style),
            Span::styled(format!("[{:>8}]", input.spinner.display_text()), field_style),
            Span::styled(" ▲▼", self.theme.hint),
        ])
    }
}
