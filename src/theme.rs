// theme.rs

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum ThemeName {
    #[default]
    Default,
    Nimbus,
    Metal,
}

impl ThemeName {
    pub fn installed() -> Vec<ThemeName> {
        ThemeName::iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: ThemeName,
    pub border: Style,
    pub title: Style,
    pub label: Style,
    pub value: Style,
    pub focused: Style,
    pub editing: Style,
    pub button: Style,
    pub button_focused: Style,
    pub hint: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from_name(ThemeName::Default)
    }
}

impl Theme {
    /// Picks the preferred theme when it is installed, otherwise logs the
    /// failure and keeps the default look.
    pub fn select(preferred: &str) -> Theme {
        match ThemeName::from_str(preferred.trim()) {
            Ok(name) => Theme::from_name(name),
            Err(e) => {
                log::error!(
                    "Theme {preferred:?} is not available ({e}); installed: {:?}. Using default.",
                    ThemeName::installed()
                );
                Theme::default()
            }
        }
    }

    pub fn from_name(name: ThemeName) -> Theme {
        let base = Theme {
            name,
            border: Style::default().fg(Color::DarkGray),
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::White),
            value: Style::default().fg(Color::Gray),
            focused: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            editing: Style::default().fg(Color::Black).bg(Color::Yellow),
            button: Style::default().fg(Color::White),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::DarkGray),
        };
        match name {
            ThemeName::Default => base,
            ThemeName::Nimbus => Theme {
                border: Style::default().fg(Color::Rgb(57, 105, 138)),
                title: Style::default()
                    .fg(Color::Rgb(214, 217, 223))
                    .add_modifier(Modifier::BOLD),
                value: Style::default().fg(Color::Rgb(169, 176, 190)),
                focused: Style::default()
                    .fg(Color::Rgb(115, 164, 209))
                    .add_modifier(Modifier::BOLD),
                editing: Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(57, 105, 138)),
                button_focused: Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(57, 105, 138))
                    .add_modifier(Modifier::BOLD),
                ..base
            },
            ThemeName::Metal => Theme {
                border: Style::default().fg(Color::Rgb(99, 130, 191)),
                focused: Style::default()
                    .fg(Color::Rgb(163, 184, 204))
                    .add_modifier(Modifier::BOLD),
                editing: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(184, 207, 229)),
                button_focused: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(184, 207, 229))
                    .add_modifier(Modifier::BOLD),
                ..base
            },
        }
    }
}
