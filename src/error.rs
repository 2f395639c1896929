use thiserror::Error;

#[derive(Debug, Error)]
pub enum TunerError {
    #[error("FileError: {0}")]
    File(String),
    #[error("NetworkError: {0}")]
    Network(String),
    #[error("StoreError: {0}")]
    Store(String),
    #[error("SyntaxError: {0}")]
    Syntax(String),
}
