// dialog.rs

use crate::{
    completion::{self, Completer, Completion},
    error::Result,
    settings::{CloseBehavior, InputConfig, Settings},
    spinner::NumberSpinner,
    theme::Theme,
};

/// Brightness chosen for the two sources, in (MaiTai, Chameleon) order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessPair {
    pub maitai: f64,
    pub chameleon: f64,
}

impl BrightnessPair {
    pub fn new(maitai: f64, chameleon: f64) -> Self {
        Self { maitai, chameleon }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.maitai, self.chameleon]
    }
}

impl From<BrightnessPair> for (f64, f64) {
    fn from(pair: BrightnessPair) -> Self {
        (pair.maitai, pair.chameleon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Open,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    MaiTai,
    Chameleon,
    Confirm,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::MaiTai => Focus::Chameleon,
            Focus::Chameleon => Focus::Confirm,
            Focus::Confirm => Focus::MaiTai,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::MaiTai => Focus::Confirm,
            Focus::Chameleon => Focus::MaiTai,
            Focus::Confirm => Focus::Chameleon,
        }
    }
}

/// What a close request asks the surrounding event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    // The dialog resolved; stop the event loop and hide it.
    Hide,
    // Terminate the process without resolving the waiter.
    ExitProcess,
    // The dialog already finished; nothing to do.
    Ignored,
}

#[derive(Debug)]
pub struct LabeledSpinner {
    pub label: String,
    pub spinner: NumberSpinner,
}

impl LabeledSpinner {
    fn new(input: &InputConfig) -> Result<Self> {
        Ok(Self {
            label: input.label.clone(),
            spinner: NumberSpinner::new(input.spinner)?,
        })
    }
}

/// Modal prompt for the MaiTai and Chameleon brightness.
///
/// The dialog owns both spinners and the producer half of its completion
/// channel. It moves from `Open` to either `Confirmed` or `Cancelled` exactly
/// once; later confirm or close requests are ignored.
#[derive(Debug)]
pub struct BrightnessDialog {
    pub(crate) title: String,
    pub(crate) confirm_label: String,
    pub(crate) maitai: LabeledSpinner,
    pub(crate) chameleon: LabeledSpinner,
    pub(crate) focus: Focus,
    pub(crate) theme: Theme,
    state: DialogState,
    close_behavior: CloseBehavior,
    completer: Option<Completer<BrightnessPair>>,
}

impl BrightnessDialog {
    pub fn new(settings: &Settings) -> Result<(Self, Completion<BrightnessPair>)> {
        let (completer, completion) = completion::channel();
        let dialog = Self {
            title: settings.title.clone(),
            confirm_label: settings.confirm_label.clone(),
            maitai: LabeledSpinner::new(&settings.maitai)?,
            chameleon: LabeledSpinner::new(&settings.chameleon)?,
            focus: Focus::default(),
            theme: Theme::select(&settings.theme),
            state: DialogState::Open,
            close_behavior: settings.close_behavior,
            completer: Some(completer),
        };
        log::debug!("Created dialog {:?}", dialog.title);
        Ok((dialog, completion))
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn close_behavior(&self) -> CloseBehavior {
        self.close_behavior
    }

    pub fn values(&self) -> BrightnessPair {
        BrightnessPair::new(self.maitai.spinner.value(), self.chameleon.spinner.value())
    }

    pub fn set_maitai(&mut self, value: f64) -> f64 {
        self.maitai.spinner.set_value(value)
    }

    pub fn set_chameleon(&mut self, value: f64) -> f64 {
        self.chameleon.spinner.set_value(value)
    }

    pub fn focused_spinner_mut(&mut self) -> Option<&mut NumberSpinner> {
        match self.focus {
            Focus::MaiTai => Some(&mut self.maitai.spinner),
            Focus::Chameleon => Some(&mut self.chameleon.spinner),
            Focus::Confirm => None,
        }
    }

    // Moving focus away from a spinner commits whatever was typed into it.
    pub fn focus_next(&mut self) {
        self.commit_focused();
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.commit_focused();
        self.focus = self.focus.previous();
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.commit_focused();
        self.focus = focus;
    }

    /// Confirms the current values and wakes the waiting consumer.
    /// Returns `false` if the dialog had already finished.
    pub fn confirm(&mut self) -> bool {
        if self.state != DialogState::Open {
            return false;
        }
        self.maitai.spinner.commit_edit();
        self.chameleon.spinner.commit_edit();
        let pair = self.values();
        self.state = DialogState::Confirmed;
        log::info!(
            "Brightness confirmed: MaiTai {}, Chameleon {}",
            pair.maitai,
            pair.chameleon
        );
        if let Some(completer) = self.completer.take() {
            completer.confirm(pair);
        }
        true
    }

    /// Handles the user closing the dialog by any means other than confirming.
    pub fn request_close(&mut self) -> CloseRequest {
        if self.state != DialogState::Open {
            return CloseRequest::Ignored;
        }
        match self.close_behavior {
            CloseBehavior::ExitProcess => {
                log::info!("Dialog closed without confirming; exiting process");
                CloseRequest::ExitProcess
            }
            CloseBehavior::Cancel => {
                self.state = DialogState::Cancelled;
                log::info!("Dialog cancelled");
                if let Some(completer) = self.completer.take() {
                    completer.cancel();
                }
                CloseRequest::Hide
            }
        }
    }

    fn commit_focused(&mut self) {
        if let Some(spinner) = self.focused_spinner_mut() {
            spinner.commit_edit();
        }
    }
}
