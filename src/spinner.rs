// spinner.rs

use crate::{
    error::Result,
    settings::{MAX_STEP_FRACTION_DIGITS, MIN_STEP, SpinnerConfig},
};

// Fraction digits kept by step arithmetic even for coarse steps.
const MIN_FRACTION_DIGITS: usize = 3;

/// A bounded, stepped numeric input.
///
/// Every value stored in the spinner lies inside `[min, max]`: out-of-range
/// input is clamped to the nearest bound rather than rejected. In-range
/// values are kept exactly. Only stepping rounds, to the step's decimal
/// precision, so that stepping from `-0.5` seventeen times by `0.1` lands on
/// exactly `1.2`.
#[derive(Debug, Clone)]
pub struct NumberSpinner {
    config: SpinnerConfig,
    value: f64,
    precision: usize,
    edit: Option<String>,
}

impl NumberSpinner {
    pub fn new(config: SpinnerConfig) -> Result<Self> {
        config.validate()?;
        let precision = fraction_digits(config.step)
            .clamp(MIN_FRACTION_DIGITS, MAX_STEP_FRACTION_DIGITS);
        let mut spinner = Self {
            config,
            value: config.default,
            precision,
            edit: None,
        };
        spinner.value = spinner.clamp(config.default);
        Ok(spinner)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the value, clamping it into range. Non-finite input is ignored.
    /// Returns the value actually stored.
    pub fn set_value(&mut self, value: f64) -> f64 {
        if value.is_finite() {
            self.value = self.clamp(value);
        } else {
            log::warn!("Ignoring non-finite spinner value {value}");
        }
        self.value
    }

    pub fn increment(&mut self) -> f64 {
        self.step_by(self.config.step)
    }

    pub fn decrement(&mut self) -> f64 {
        self.step_by(-self.config.step)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Appends a character to the text being typed. The first typed character
    /// replaces the displayed value. Characters that cannot appear in a
    /// number are rejected.
    pub fn push_char(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) {
            return false;
        }
        self.edit.get_or_insert_with(String::new).push(c);
        true
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.edit.as_mut() {
            text.pop();
        } else {
            // Start editing from the displayed value, minus its last character.
            let mut text = self.format_value();
            text.pop();
            self.edit = Some(text);
        }
    }

    /// Parses the pending text into the value. Unparseable text reverts to the
    /// previous value. Returns `true` when nothing was pending or the text was
    /// accepted.
    pub fn commit_edit(&mut self) -> bool {
        let Some(text) = self.edit.take() else {
            return true;
        };
        match text.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => {
                let stored = self.set_value(parsed);
                if stored != parsed {
                    log::debug!("Clamped typed value {parsed} to {stored}");
                }
                true
            }
            _ => {
                log::warn!("Reverting unparseable spinner text {text:?}");
                false
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn display_text(&self) -> String {
        match &self.edit {
            Some(text) => text.clone(),
            None => self.format_value(),
        }
    }

    fn step_by(&mut self, delta: f64) -> f64 {
        let target = self.value + delta;
        let scale = 10f64.powi(self.precision as i32);
        let rounded = (target * scale).round() / scale;
        // Huge magnitudes overflow the scaled value; step those unrounded.
        let stepped = if rounded.is_finite() { rounded } else { target };
        self.value = self.clamp(stepped);
        self.value
    }

    fn clamp(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.config.min, self.config.max);
        if clamped == 0.0 { 0.0 } else { clamped }
    }

    fn format_value(&self) -> String {
        let text = self.value.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        }
    }
}

// Number of digits after the decimal point in the shortest representation of `value`.
fn fraction_digits(value: f64) -> usize {
    let text = value.to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => 0,
    }
}
