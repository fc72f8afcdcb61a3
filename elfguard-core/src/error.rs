use thiserror::Error;

/// Reasons a header read can fail.
///
/// The surface is deliberately coarse: callers branch on the kind only. Which
/// check rejected the buffer is reported through `log` at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// The buffer is too short for the region about to be read, or the
    /// declared length exceeds the buffer.
    #[error("invalid arguments")]
    InvalidArguments,

    /// The buffer content failed an integrity check.
    #[error("invalid data")]
    InvalidData,
}

impl Error {
    /// Stable lowercase name of the error kind, e.g. `"invalid-data"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::InvalidArguments => "invalid-arguments",
            Error::InvalidData => "invalid-data",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A raw field value outside one of the closed enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognized {field} value {raw:#x}")]
pub struct Unrecognized {
    pub field: &'static str,
    pub raw: u64,
}

impl Unrecognized {
    pub(crate) fn new(field: &'static str, raw: impl Into<u64>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }
}

/// Logs the rejected field and collapses it into [`Error::InvalidData`].
pub(crate) fn reject(err: Unrecognized) -> Error {
    log::debug!("rejecting ELF header: {err}");
    Error::InvalidData
}
