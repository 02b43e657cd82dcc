use thiserror::Error;
use xref_pager::PagerError;

pub type Result<T> = std::result::Result<T, AssembleError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssembleError {
    #[error("invalid text offsets: {0}")]
    InvalidSpan(String),

    #[error("anchor past EOF")]
    AnchorPastEof,

    #[error("missing decoration's parent file")]
    MissingParentFile,

    #[error("unable to decode file text: {0}")]
    Decode(#[from] xref_text::TextError),

    #[error("no active set; a start call must precede groups")]
    NoActiveSet,
}

impl From<PagerError<AssembleError>> for AssembleError {
    fn from(err: PagerError<AssembleError>) -> Self {
        match err {
            PagerError::NoActiveSet => AssembleError::NoActiveSet,
            PagerError::Output(err) => err,
        }
    }
}
