// /app.rs
use crate::{
    completion::Completion,
    dialog::{BrightnessDialog, BrightnessPair},
    error::{DialogError, Result},
    settings::Settings,
    tui::{Tui, TuiEvent},
    ui::Component,
};

use crossterm::event::{KeyEvent, KeyEventKind};
use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

pub const UI_THREAD_NAME: &str = "brightness-ui";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Stop the event loop and take the dialog off screen.
    Hide,
    ExitProcess,
}

/// How the event loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppExit {
    Hidden,
    ExitProcess,
}

/// Event loop driving a single dialog on the UI thread.
#[derive(Debug)]
pub struct App {
    running: bool,
    exit: AppExit,
    dialog: BrightnessDialog,
}

impl App {
    pub fn new(dialog: BrightnessDialog) -> Self {
        Self {
            running: true,
            exit: AppExit::Hidden,
            dialog,
        }
    }

    pub fn dialog(&self) -> &BrightnessDialog {
        &self.dialog
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn exit_reason(&self) -> AppExit {
        self.exit
    }

    pub async fn run(&mut self) -> color_eyre::Result<AppExit> {
        let mut tui = Tui::new()?
            .tick_rate(4.0) // 4 ticks per second
            .frame_rate(30.0); // 30 frames per second

        tui.enter()?; // Starts event handler, enters raw mode, enters alternate screen

        while self.running {
            tui.draw(|frame| self.dialog.render(frame.area(), frame.buffer_mut()))?;

            match tui.next().await {
                Some(event) => self.handle_tui_event(event),
                None => break,
            }
        }

        tui.exit().await?; // stops event handler, exits raw mode, exits alternate screen
        Ok(self.exit)
    }

    pub fn handle_tui_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.on_key(key_event)
            }
            TuiEvent::Error => log::warn!("Terminal reported an input error"),
            TuiEvent::Resize(width, height) => log::debug!("Terminal resized to {width}x{height}"),
            TuiEvent::Key(_)
            | TuiEvent::Init
            | TuiEvent::Tick
            | TuiEvent::Render
            | TuiEvent::FocusGained
            | TuiEvent::FocusLost => {}
        }
    }

    fn on_key(&mut self, key_event: KeyEvent) {
        if let Some(action) = self.dialog.on_key(key_event) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        self.running = false;
        self.exit = match action {
            Action::Hide => AppExit::Hidden,
            Action::ExitProcess => AppExit::ExitProcess,
        };
    }
}

/// Shows the dialog on a dedicated UI thread and returns a handle the caller
/// can block on.
pub fn show(settings: &Settings) -> Result<DialogHandle> {
    let (dialog, completion) = BrightnessDialog::new(settings)?;
    let ui_thread = thread::Builder::new()
        .name(UI_THREAD_NAME.to_string())
        .spawn(move || run_ui_thread(dialog))?;
    Ok(DialogHandle::with_ui_thread(completion, ui_thread))
}

fn run_ui_thread(dialog: BrightnessDialog) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let exit = runtime.block_on(async move { App::new(dialog).run().await })?;
    if exit == AppExit::ExitProcess {
        log::logger().flush();
        std::process::exit(0);
    }
    Ok(())
}

/// Caller-side handle of a shown dialog.
#[derive(Debug)]
pub struct DialogHandle {
    completion: Completion<BrightnessPair>,
    ui_thread: Option<JoinHandle<Result<()>>>,
}

// A handle for a dialog whose events are driven by the caller's own loop.
impl From<Completion<BrightnessPair>> for DialogHandle {
    fn from(completion: Completion<BrightnessPair>) -> Self {
        Self {
            completion,
            ui_thread: None,
        }
    }
}

impl DialogHandle {
    pub(crate) fn with_ui_thread(
        completion: Completion<BrightnessPair>,
        ui_thread: JoinHandle<Result<()>>,
    ) -> Self {
        Self {
            completion,
            ui_thread: Some(ui_thread),
        }
    }

    /// Blocks until the user confirms, then releases the UI thread and
    /// returns (MaiTai, Chameleon). Closing the dialog instead yields
    /// `DialogError::Cancelled`.
    pub fn brightness_when_finished(mut self) -> Result<BrightnessPair> {
        let outcome = self.completion.wait();
        self.finish(outcome)
    }

    /// Like [`DialogHandle::brightness_when_finished`], but hands the handle
    /// back on timeout so the caller can keep waiting.
    pub fn brightness_within(
        mut self,
        timeout: Duration,
    ) -> std::result::Result<Result<BrightnessPair>, DialogHandle> {
        match self.completion.wait_timeout(timeout) {
            Err(DialogError::Timeout) => Err(self),
            outcome => Ok(self.finish(outcome)),
        }
    }

    fn finish(
        &mut self,
        outcome: Result<crate::completion::Outcome<BrightnessPair>>,
    ) -> Result<BrightnessPair> {
        let joined = self.join_ui_thread();
        match outcome {
            Ok(outcome) => outcome.into_result(),
            // The UI thread's own error explains a dropped dialog better.
            Err(DialogError::Disconnected) => joined.and(Err(DialogError::Disconnected)),
            Err(e) => Err(e),
        }
    }

    fn join_ui_thread(&mut self) -> Result<()> {
        match self.ui_thread.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| DialogError::Ui("UI thread panicked".to_string()))?,
            None => Ok(()),
        }
    }
}
