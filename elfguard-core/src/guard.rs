//! Length preconditions checked before any byte is interpreted.

use crate::error::{Error, Result};
use crate::ident::IDENT_SIZE;

/// Returns the identification block, or [`Error::InvalidArguments`] if the
/// buffer cannot hold one.
pub(crate) fn check_ident(buffer: &[u8]) -> Result<&[u8]> {
    buffer.get(..IDENT_SIZE).ok_or_else(|| {
        log::debug!(
            "buffer of {} bytes is shorter than the identification block",
            buffer.len()
        );
        Error::InvalidArguments
    })
}

/// Ensures the buffer holds the full header of the resolved class.
pub(crate) fn check_layout(buffer: &[u8], header_size: usize) -> Result<()> {
    if buffer.len() < header_size {
        log::debug!(
            "buffer of {} bytes is shorter than the {header_size}-byte header",
            buffer.len()
        );
        return Err(Error::InvalidArguments);
    }
    Ok(())
}

/// Narrows `buffer` to a caller-declared length.
pub(crate) fn check_declared(buffer: &[u8], length: usize) -> Result<&[u8]> {
    buffer.get(..length).ok_or_else(|| {
        log::debug!(
            "declared length {length} exceeds the {}-byte buffer",
            buffer.len()
        );
        Error::InvalidArguments
    })
}
