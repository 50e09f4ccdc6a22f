use thiserror::Error;

// Errors surfaced by the dialog and its completion channel.
#[derive(Debug, Error)]
pub enum DialogError {
    #[error("Dialog was cancelled")]
    Cancelled, // The user closed the dialog without confirming.

    #[error("Dialog closed before producing a result")]
    Disconnected, // The dialog was dropped while still open.

    #[error("Timed out waiting for the dialog")]
    Timeout,

    #[error("Dialog result was already taken")]
    AlreadyResolved,

    #[error("Invalid spinner configuration: {0}")]
    InvalidConfig(String),

    #[error("Terminal UI error: {0}")]
    Ui(String), // The UI thread failed to drive the terminal.

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<color_eyre::Report> for DialogError {
    fn from(report: color_eyre::Report) -> Self {
        DialogError::Ui(format!("{report:#}"))
    }
}

pub type Result<T> = std::result::Result<T, DialogError>;
