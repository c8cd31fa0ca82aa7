use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building or drawing the scene.
#[derive(Debug, Error)]
pub enum Error {
    /// A color string was not `#rrggbb`.
    #[error("invalid hex color `{0}`: expected 6 hex digits with an optional leading '#'")]
    Format(String),

    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Writing to the terminal failed. There is nothing useful to do without output.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig { field, reason: reason.into() }
    }
}
