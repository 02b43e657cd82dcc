use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextError {
    #[error("unsupported text encoding {0:?}")]
    UnsupportedEncoding(String),

    #[error("file text is not valid UTF-8")]
    InvalidUtf8,
}
