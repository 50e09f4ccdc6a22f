// ui/mod.rs

mod brightness_dialog;
pub mod utils;

pub use brightness_dialog::popup_size;
use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect};
use std::fmt::Debug;

use crate::app::Action;

pub trait Component: Debug {
    fn on_key(&mut self, key: KeyEvent) -> Option<Action>;
    fn render(&mut self, area: Rect, buffer: &mut Buffer);
}
