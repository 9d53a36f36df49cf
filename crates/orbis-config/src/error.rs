//! Errors raised at the settings boundary.

/// Why settings could not be loaded, stored or accepted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `config.ron` could not be read.
    #[error("cannot read config.ron: {0}")]
    ReadError(#[source] std::io::Error),

    /// `config.ron` or its directory could not be written.
    #[error("cannot write config.ron: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file is not valid RON for [`crate::Config`].
    #[error("malformed config.ron: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Settings could not be rendered as RON.
    #[error("cannot encode settings as RON: {0}")]
    SerializeError(#[source] ron::Error),

    /// A value is outside the range generation or viewing can handle.
    #[error("invalid settings: {0}")]
    Validation(String),

    /// A colour string is not of the form `#rrggbb`.
    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),
}
