pub mod app;
pub mod completion;
pub mod dialog;
pub mod error;
pub mod logging;
pub mod settings;
pub mod spinner;
pub mod theme;
pub mod tui;
pub mod ui;

// Re-export commonly used items for easier access
pub use app::{App, DialogHandle, show};
pub use completion::{Completer, Completion, Outcome};
pub use dialog::{BrightnessDialog, BrightnessPair, DialogState, Focus};
pub use error::{DialogError, Result};
pub use settings::{CloseBehavior, InputConfig, Settings, SpinnerConfig};
pub use spinner::NumberSpinner;
pub use theme::{Theme, ThemeName};
