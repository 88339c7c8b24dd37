use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP request could not be completed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The registrar answered with something that is not XML
    #[error("Failed to parse registrar response: {source}")]
    Parse {
        #[source]
        source: roxmltree::Error,
        /// Body as received, kept so it can still be shown
        raw: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
