// settings.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DialogError, Result};

pub const DEFAULT_TITLE: &str = "Set desired brightness";
pub const DEFAULT_CONFIRM_LABEL: &str = "Ok";
pub const DEFAULT_THEME: &str = "Nimbus";

/// Finest step a spinner accepts. Stepping rounds to at most this many
/// fraction digits.
pub const MAX_STEP_FRACTION_DIGITS: usize = 12;
pub const MIN_STEP: f64 = 1e-12;

// Bounds, step and starting value of a single numeric spinner.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpinnerConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        SpinnerConfig {
            min: -3.0,
            max: 3.0,
            step: 0.1,
            default: -0.5,
        }
    }
}

impl SpinnerConfig {
    pub fn new(min: f64, max: f64, step: f64, default: f64) -> Result<Self> {
        let config = SpinnerConfig {
            min,
            max,
            step,
            default,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min", self.min),
            ("max", self.max),
            ("step", self.step),
            ("default", self.default),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(DialogError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.min > self.max {
            return Err(DialogError::InvalidConfig(format!(
                "min ({}) is greater than max ({})",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(DialogError::InvalidConfig(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.step < MIN_STEP {
            return Err(DialogError::InvalidConfig(format!(
                "step must be at least {MIN_STEP:e}, got {:e}",
                self.step
            )));
        }
        if self.default < self.min || self.default > self.max {
            return Err(DialogError::InvalidConfig(format!(
                "default ({}) is outside [{}, {}]",
                self.default, self.min, self.max
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub label: String,
    #[serde(default)]
    pub spinner: SpinnerConfig,
}

impl InputConfig {
    pub fn new(label: impl Into<String>, spinner: SpinnerConfig) -> Self {
        Self {
            label: label.into(),
            spinner,
        }
    }
}

// What a close request (Esc, Ctrl-C) does while the dialog is still open.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CloseBehavior {
    // Terminate the whole process, leaving the waiter blocked until exit.
    ExitProcess,
    // Resolve the waiter with a cancelled outcome.
    #[default]
    Cancel,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub maitai: InputConfig,
    pub chameleon: InputConfig,
    pub confirm_label: String,
    pub close_behavior: CloseBehavior,
    pub theme: String, // Preferred theme name, resolved by `Theme::select`.
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            title: DEFAULT_TITLE.to_string(),
            maitai: InputConfig::new("MaiTai brightness:", SpinnerConfig::default()),
            chameleon: InputConfig::new("Chameleon brightness:", SpinnerConfig::default()),
            confirm_label: DEFAULT_CONFIRM_LABEL.to_string(),
            close_behavior: CloseBehavior::default(),
            theme: DEFAULT_THEME.to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.maitai.spinner.validate()?;
        self.chameleon.spinner.validate()
    }

    // Load settings from the default file. A missing file (or no home directory) yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_or_default_from(path),
            None => Ok(Self::default()),
        }
    }

    // Like `load_settings_from_file`, but a file that does not exist yields defaults.
    // A file that exists and cannot be read, parsed or validated is an error.
    pub fn load_or_default_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_settings_from_file(path)
    }

    pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&data)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        get_data_dir().map(|dir| dir.join("settings.json"))
    }

    // Directory the log file is written to: the configured one, else the data directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(get_data_dir)
            .unwrap_or_else(std::env::temp_dir)
    }
}

pub fn get_data_dir() -> Option<PathBuf> {
    dirs_next::home_dir().map(|home| home.join("brightness_dialog").join("data"))
}
