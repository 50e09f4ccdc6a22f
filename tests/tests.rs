// ../tests/tests.rs
use brightness_dialog::app::{Action, AppExit};
use brightness_dialog::tui::TuiEvent;
use brightness_dialog::ui::Component;
use brightness_dialog::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::thread;
use std::time::Duration;

fn key(code: KeyCode) -> TuiEvent {
    TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_tui_event(key(KeyCode::Char(c)));
    }
}

fn open_app(settings: &Settings) -> (App, Completion<BrightnessPair>) {
    let (dialog, completion) = BrightnessDialog::new(settings).expect("Default settings are valid");
    (App::new(dialog), completion)
}

#[test]
fn test_confirming_defaults_returns_defaults() {
    let (mut dialog, mut completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    let waiter = thread::spawn(move || completion.wait());

    assert!(dialog.confirm());

    let outcome = waiter.join().expect("Waiter thread panicked").unwrap();
    assert_eq!(outcome, Outcome::Confirmed(BrightnessPair::new(-0.5, -0.5)));
}

#[test]
fn test_confirm_returns_values_in_maitai_chameleon_order() {
    let (mut dialog, mut completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    let waiter = thread::spawn(move || completion.wait());

    assert_eq!(dialog.set_maitai(1.2), 1.2);
    assert_eq!(dialog.set_chameleon(-2.0), -2.0);
    dialog.confirm();

    let pair = waiter.join().unwrap().unwrap().into_result().unwrap();
    assert_eq!(pair, BrightnessPair::new(1.2, -2.0));
    assert_eq!(pair.as_array(), [1.2, -2.0]);
    assert_eq!(<(f64, f64)>::from(pair), (1.2, -2.0));
}

#[test]
fn test_keyboard_entry_then_ok() {
    let (mut app, mut completion) = open_app(&Settings::default());

    type_text(&mut app, "1.2");
    app.handle_tui_event(key(KeyCode::Tab));
    type_text(&mut app, "-2");
    app.handle_tui_event(key(KeyCode::Tab));
    assert_eq!(app.dialog().focus(), Focus::Confirm);
    assert!(app.is_running());

    app.handle_tui_event(key(KeyCode::Enter));

    assert!(!app.is_running());
    assert_eq!(app.exit_reason(), AppExit::Hidden);
    assert_eq!(app.dialog().state(), DialogState::Confirmed);
    let outcome = completion.wait_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(outcome, Outcome::Confirmed(BrightnessPair::new(1.2, -2.0)));
}

#[test]
fn test_stepping_lands_on_exact_values() {
    let (mut app, mut completion) = open_app(&Settings::default());

    for _ in 0..17 {
        app.handle_tui_event(key(KeyCode::Up));
    }
    app.handle_tui_event(key(KeyCode::Tab));
    for _ in 0..15 {
        app.handle_tui_event(key(KeyCode::Char('j')));
    }
    assert_eq!(
        app.dialog().values(),
        BrightnessPair::new(1.2, -2.0),
        "Seventeen steps up and fifteen down from -0.5"
    );

    app.handle_tui_event(key(KeyCode::Tab));
    app.handle_tui_event(key(KeyCode::Enter));
    let pair = completion.wait().unwrap().into_result().unwrap();
    assert_eq!(pair, BrightnessPair::new(1.2, -2.0));
}

#[test]
fn test_every_grid_value_is_returned_exactly() {
    for tenths in -30..=30 {
        let value = tenths as f64 / 10.0;
        let (mut dialog, mut completion) = BrightnessDialog::new(&Settings::default()).unwrap();
        dialog.set_maitai(value);
        dialog.set_chameleon(-value);
        dialog.confirm();
        let pair = completion.wait().unwrap().into_result().unwrap();
        assert_eq!(pair, BrightnessPair::new(value, -value));
    }
}

#[test]
fn test_out_of_range_values_clamp_to_bounds() {
    let (mut dialog, _completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    assert_eq!(dialog.set_maitai(-4.0), -3.0);
    assert_eq!(dialog.set_chameleon(3.7), 3.0);

    let mut spinner = NumberSpinner::new(SpinnerConfig::default()).unwrap();
    for _ in 0..100 {
        spinner.increment();
    }
    assert_eq!(spinner.value(), 3.0);
    for _ in 0..100 {
        spinner.decrement();
    }
    assert_eq!(spinner.value(), -3.0);
}

#[test]
fn test_typed_out_of_range_value_is_clamped() {
    let (mut app, _completion) = open_app(&Settings::default());
    type_text(&mut app, "9");
    app.handle_tui_event(key(KeyCode::Enter));
    assert_eq!(app.dialog().values().maitai, 3.0);

    type_text(&mut app, "-12.5");
    app.handle_tui_event(key(KeyCode::Tab));
    assert_eq!(app.dialog().values().maitai, -3.0);
}

#[test]
fn test_unparseable_text_reverts() {
    let mut spinner = NumberSpinner::new(SpinnerConfig::default()).unwrap();
    spinner.set_value(0.7);
    for c in "1..2".chars() {
        assert!(spinner.push_char(c));
    }
    assert!(!spinner.push_char('x'));
    assert_eq!(spinner.display_text(), "1..2");
    assert!(!spinner.commit_edit());
    assert_eq!(spinner.value(), 0.7);
    assert_eq!(spinner.display_text(), "0.7");
}

#[test]
fn test_backspace_edits_displayed_value() {
    let mut spinner = NumberSpinner::new(SpinnerConfig::default()).unwrap();
    spinner.backspace();
    assert_eq!(spinner.display_text(), "-0.");
    spinner.push_char('8');
    assert!(spinner.commit_edit());
    assert_eq!(spinner.value(), -0.8);
}

#[test]
fn test_non_finite_values_are_ignored() {
    let mut spinner = NumberSpinner::new(SpinnerConfig::default()).unwrap();
    assert_eq!(spinner.set_value(f64::NAN), -0.5);
    assert_eq!(spinner.set_value(f64::INFINITY), -0.5);
}

#[test]
fn test_waiter_blocks_until_confirm() {
    let (mut dialog, mut completion) = BrightnessDialog::new(&Settings::default()).unwrap();

    assert!(matches!(
        completion.wait_timeout(Duration::from_millis(50)),
        Err(DialogError::Timeout)
    ));
    assert!(matches!(completion.try_take(), Ok(None)));
    assert!(!completion.is_resolved());

    dialog.confirm();

    let outcome = completion.wait_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(outcome, Outcome::Confirmed(BrightnessPair::new(-0.5, -0.5)));
    assert!(completion.is_resolved());
    assert!(matches!(completion.wait(), Err(DialogError::AlreadyResolved)));
}

#[test]
fn test_handle_hands_back_on_timeout() {
    let (mut dialog, completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    let handle = DialogHandle::from(completion);

    let handle = handle
        .brightness_within(Duration::from_millis(20))
        .expect_err("Dialog is still open");
    dialog.set_maitai(2.5);
    dialog.confirm();

    let pair = handle.brightness_when_finished().unwrap();
    assert_eq!(pair, BrightnessPair::new(2.5, -0.5));
}

#[test]
fn test_completion_flag_flips_once_per_instance() {
    let (mut first, _first_completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    assert_eq!(first.state(), DialogState::Open);
    assert!(first.confirm());
    assert!(!first.confirm());
    assert_eq!(first.state(), DialogState::Confirmed);

    let (mut second, mut second_completion) =
        BrightnessDialog::new(&Settings::default()).unwrap();
    assert_eq!(second.state(), DialogState::Open);
    second.set_maitai(0.3);
    assert!(second.confirm());
    assert_eq!(
        second_completion.wait().unwrap(),
        Outcome::Confirmed(BrightnessPair::new(0.3, -0.5))
    );
}

#[test]
fn test_close_under_cancel_resolves_cancelled() {
    let (mut app, mut completion) = open_app(&Settings::default());

    app.handle_tui_event(key(KeyCode::Esc));

    assert!(!app.is_running());
    assert_eq!(app.exit_reason(), AppExit::Hidden);
    assert_eq!(app.dialog().state(), DialogState::Cancelled);
    let outcome = completion.wait().unwrap();
    assert_eq!(outcome, Outcome::Cancelled);
    assert!(matches!(outcome.into_result(), Err(DialogError::Cancelled)));
}

#[test]
fn test_close_under_exit_process_leaves_waiter_pending() {
    let settings = Settings {
        close_behavior: CloseBehavior::ExitProcess,
        ..Settings::default()
    };
    let (mut app, mut completion) = open_app(&settings);

    app.handle_tui_event(TuiEvent::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));

    assert!(!app.is_running());
    assert_eq!(app.exit_reason(), AppExit::ExitProcess);
    assert_eq!(app.dialog().state(), DialogState::Open);
    assert!(matches!(completion.try_take(), Ok(None)));
}

#[test]
fn test_esc_while_typing_only_abandons_the_edit() {
    let (mut app, _completion) = open_app(&Settings::default());
    type_text(&mut app, "2.4");
    app.handle_tui_event(key(KeyCode::Esc));

    assert!(app.is_running());
    assert_eq!(app.dialog().state(), DialogState::Open);
    assert_eq!(app.dialog().values().maitai, -0.5);
}

#[test]
fn test_keys_after_confirm_are_ignored() {
    let (mut dialog, _completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    dialog.set_focus(Focus::Confirm);
    assert_eq!(
        dialog.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        Some(Action::Hide)
    );
    assert_eq!(
        dialog.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
        None
    );
    assert_eq!(dialog.state(), DialogState::Confirmed);
}

#[test]
fn test_confirm_commits_pending_edit() {
    let (mut dialog, mut completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    dialog.set_focus(Focus::Chameleon);
    for c in "1.5".chars() {
        dialog.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    dialog.confirm();
    assert_eq!(
        completion.wait().unwrap(),
        Outcome::Confirmed(BrightnessPair::new(-0.5, 1.5))
    );
}

#[test]
fn test_dropped_dialog_disconnects_waiter() {
    let (dialog, mut completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    let waiter = thread::spawn(move || completion.wait());
    drop(dialog);
    assert!(matches!(
        waiter.join().unwrap(),
        Err(DialogError::Disconnected)
    ));
}

#[test]
fn test_focus_cycles_both_ways() {
    let (mut dialog, _completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    assert_eq!(dialog.focus(), Focus::MaiTai);
    dialog.focus_next();
    dialog.focus_next();
    assert_eq!(dialog.focus(), Focus::Confirm);
    dialog.focus_next();
    assert_eq!(dialog.focus(), Focus::MaiTai);
    dialog.focus_previous();
    assert_eq!(dialog.focus(), Focus::Confirm);
}

#[tokio::test]
async fn test_async_consumer_receives_pair() {
    let (mut dialog, mut completion) = BrightnessDialog::new(&Settings::default()).unwrap();
    let ui = tokio::task::spawn_blocking(move || {
        dialog.set_chameleon(0.9);
        dialog.confirm()
    });

    let outcome = completion.recv().await.unwrap();
    assert!(ui.await.unwrap());
    assert_eq!(outcome, Outcome::Confirmed(BrightnessPair::new(-0.5, 0.9)));
}
