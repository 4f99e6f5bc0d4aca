use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to build {statement} statement: {message}")]
    Build {
        statement: &'static str,
        message: String,
    },
}
