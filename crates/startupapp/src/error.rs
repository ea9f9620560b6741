use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("an entry with id `{0}` is already registered")]
    DuplicateId(String),

    #[error("no entry with id `{0}` (run `user-startup list` to see registered ids)")]
    NotFound(String),

    #[error("platform adapter failure: {0}")]
    Adapter(String),

    #[error("registry at {} is corrupt: {reason}", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(String),
}

impl StartupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StartupError::NotFound(_))
    }
}

impl From<confique::Error> for StartupError {
    fn from(err: confique::Error) -> Self {
        StartupError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StartupError>;
