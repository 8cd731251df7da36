use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("screen '{0}' does not exist")]
    UnknownScreen(String),
    #[error("overlay '{0}' does not exist")]
    UnknownOverlay(String),
    #[error("style '{style}' does not exist for {kind} element")]
    UnknownStyle { kind: String, style: String },
    #[error("no element is labelled '{0}'")]
    UnknownLabel(String),
    #[error("theme '{0}' does not exist")]
    UnknownTheme(String),
    #[error("element no longer exists")]
    StaleNode,
    #[error("table must have at least one column")]
    TableWithoutColumns,
    #[error("invalid theme: {0}")]
    InvalidTheme(#[source] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, UiError>;
