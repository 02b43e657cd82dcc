use thiserror::Error;

pub type Result<T> = std::result::Result<T, TicketError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TicketError {
    #[error("invalid ticket scheme: {0}")]
    InvalidScheme(String),

    #[error("invalid percent escape: {0}")]
    BadEscape(String),

    #[error("malformed ticket: {0}")]
    Malformed(String),
}
