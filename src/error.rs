use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur while the
/// schedule is fetched, merged, aggregated, rendered, or written.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Transport failures talking to the spreadsheet service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials are missing or were rejected by the spreadsheet service.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The spreadsheet or one of its named sheets does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Raised when a row lacks one of the columns the merge depends on.
    #[error("sheet {sheet} row {row} is missing required column '{column}'")]
    Schema {
        sheet: String,
        row: usize,
        column: String,
    },

    /// Raised when a track id cannot be used as a slide file name.
    #[error("track id '{0}' is not usable as a file name")]
    InvalidTrackId(String),

    /// Raised when a presentation type has no icon mapping.
    #[error("no icon configured for presentation type '{0}'")]
    IconLookup(String),

    /// Raised when the configuration file is unreadable or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Raised when a document could not be rendered.
    #[error("render error: {0}")]
    Render(String),

    /// Raised when the configuration file given on the command line does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<std::fmt::Error> for ToolError {
    fn from(error: std::fmt::Error) -> Self {
        ToolError::Render(error.to_string())
    }
}

impl From<toml::de::Error> for ToolError {
    fn from(error: toml::de::Error) -> Self {
        ToolError::Config(error.to_string())
    }
}
