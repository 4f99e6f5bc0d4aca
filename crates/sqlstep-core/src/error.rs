use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown database backend: {0}")]
    UnknownBackend(String),
    #[error("unknown engine variant: {0}")]
    UnknownVariant(String),
}
