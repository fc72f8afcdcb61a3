use crate::error::{Error, Result};
use crate::guard;
use crate::header::elf::ElfHeader;
use crate::ident::{parse_ident, Class};
use crate::layout::RawLayout;
use crate::validate::validate;

/// Reads the ELF header at the start of `buffer` and verifies its integrity.
///
/// Stages run in order and the first failure ends the read:
/// the identification block (magic, class, byte order, version), the
/// class-width fields in the declared byte order, then the closed-set checks
/// on object type, machine and ABI.
///
/// Returns [`crate::Error::InvalidArguments`] if `buffer` is shorter than the
/// identification block or than the full header of the class it declares,
/// and [`crate::Error::InvalidData`] for anything wrong with the content.
/// Bytes past the header are ignored.
pub fn read_header(buffer: &[u8]) -> Result<ElfHeader> {
    let ident = parse_ident(buffer)?;

    let header = match ident.class {
        Class::Elf32 => {
            let raw = RawLayout::<u32>::read(buffer, ident.encoding)?;
            ElfHeader::Elf32(validate(ident, raw)?)
        }
        Class::Elf64 => {
            let raw = RawLayout::<u64>::read(buffer, ident.encoding)?;
            ElfHeader::Elf64(validate(ident, raw)?)
        }
        Class::None => return Err(Error::InvalidData),
    };

    log::debug!(
        "accepted {} {} header for {}",
        header.class(),
        header.object_type(),
        header.machine()
    );
    Ok(header)
}

/// Like [`read_header`], but only the first `length` bytes of `buffer` are
/// considered. A `length` beyond the end of `buffer` is
/// [`crate::Error::InvalidArguments`].
pub fn read_header_with_length(buffer: &[u8], length: usize) -> Result<ElfHeader> {
    read_header(guard::check_declared(buffer, length)?)
}
