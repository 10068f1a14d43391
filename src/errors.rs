use thiserror::Error;

#[derive(Error, Debug)]
pub enum IgnoreError {
    #[error("Base path must be absolute: {0}")]
    BasePathNotAbsolute(String),

    #[error("File read failed: {0}")]
    FileReadError(String),

    #[error("Regex Error: {0}")]
    RegexError(String),
}

impl From<std::io::Error> for IgnoreError {
    fn from(err: std::io::Error) -> Self {
        IgnoreError::FileReadError(err.to_string())
    }
}

impl From<regex::Error> for IgnoreError {
    fn from(err: regex::Error) -> Self {
        IgnoreError::RegexError(err.to_string())
    }
}
