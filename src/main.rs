use brightness_dialog::{CloseBehavior, DialogError, Settings, ThemeName, logging};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::{path::PathBuf, process::ExitCode};

#[derive(Debug, Parser)]
#[command(version, about = "Prompt for MaiTai and Chameleon brightness")]
struct Cli {
    /// Settings file to use instead of the one in the data directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preferred theme; unknown names fall back to the default look.
    #[arg(long)]
    theme: Option<String>,

    /// What closing the dialog without confirming does.
    #[arg(long, value_enum)]
    close_behavior: Option<CloseBehavior>,

    /// Write the default settings to this path and exit.
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,

    /// List the installed themes and exit.
    #[arg(long)]
    list_themes: bool,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = cli.write_default_config {
        Settings::default()
            .save_to_file(&path)
            .wrap_err_with(|| format!("Failed to write settings to {}", path.display()))?;
        println!("{}", path.display());
        return Ok(ExitCode::SUCCESS);
    }
    if cli.list_themes {
        for name in ThemeName::installed() {
            println!("{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    // A broken default settings file is reported, then the defaults are used.
    let mut load_failure = None;
    let mut settings = match &cli.config {
        Some(path) => Settings::load_settings_from_file(path)
            .wrap_err_with(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load().unwrap_or_else(|e| {
            let message = match Settings::default_path() {
                Some(path) => format!("Failed to load settings from {}: {e}", path.display()),
                None => format!("Failed to load settings: {e}"),
            };
            eprintln!("{message}; using defaults");
            load_failure = Some(message);
            Settings::default()
        }),
    };
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    if let Some(close_behavior) = cli.close_behavior {
        settings.close_behavior = close_behavior;
    }

    // A dialog without a log file is still usable.
    if let Err(e) = logging::init(&settings.log_dir(), log::Level::Debug) {
        eprintln!("Logging disabled: {e}");
    }
    log::info!(
        "Brightness dialog start: {}, preferred theme {:?}",
        chrono::Local::now(),
        settings.theme
    );
    if let Some(message) = load_failure {
        log::warn!("{message}; using defaults");
    }

    let handle = brightness_dialog::show(&settings)?;
    match handle.brightness_when_finished() {
        Ok(pair) => {
            println!("{} {}", pair.maitai, pair.chameleon);
            Ok(ExitCode::SUCCESS)
        }
        Err(DialogError::Cancelled) => {
            eprintln!("Cancelled");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
