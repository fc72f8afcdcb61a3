//! Class-dependent part of the header, decoded in the declared byte order.

use std::fmt::Debug;
use std::io::{self, Cursor, Read};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::ident::{Encoding, IDENT_SIZE};

/// An unsigned field that can be read in either byte order.
pub(crate) trait Word: Copy + Debug + Into<u64> {
    fn read<B: ByteOrder, R: Read>(reader: &mut R) -> io::Result<Self>;
}

impl Word for u16 {
    fn read<B: ByteOrder, R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u16::<B>()
    }
}

impl Word for u32 {
    fn read<B: ByteOrder, R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u32::<B>()
    }
}

impl Word for u64 {
    fn read<B: ByteOrder, R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u64::<B>()
    }
}

/// Reads one `W`-wide integer in `encoding`.
///
/// Every multi-byte field of the header goes through here.
pub(crate) fn read_word<W: Word, R: Read>(reader: &mut R, encoding: Encoding) -> Result<W> {
    let word = match encoding {
        Encoding::Little => W::read::<LittleEndian, _>(reader),
        Encoding::Big => W::read::<BigEndian, _>(reader),
        Encoding::None => {
            log::debug!("refusing to decode fields without a byte order");
            return Err(Error::InvalidData);
        }
    };
    word.map_err(|err| {
        log::debug!("header truncated: {err}");
        Error::InvalidArguments
    })
}

/// Header fields after the identification block, with no value checks
/// applied. `A` is `u32` or `u64` depending on the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawLayout<A> {
    pub object_type: u16,
    pub machine: u16,
    pub version: u32,
    pub entrypoint: A,
    pub program_header_offset: A,
    pub section_header_offset: A,
    pub flags: u32,
    pub header_size: u16,
    pub program_header_entry_size: u16,
    pub program_header_entry_count: u16,
    pub section_header_entry_size: u16,
    pub section_header_entry_count: u16,
    pub section_header_string_index: u16,
}

impl<A: Word> RawLayout<A> {
    pub(crate) fn read(buffer: &[u8], encoding: Encoding) -> Result<Self> {
        if !encoding.is_native() {
            log::trace!("decoding {encoding} header on a host of the other byte order");
        }

        let mut cur = Cursor::new(buffer);
        cur.set_position(IDENT_SIZE as u64);

        Ok(RawLayout {
            object_type: read_word(&mut cur, encoding)?,
            machine: read_word(&mut cur, encoding)?,
            version: read_word(&mut cur, encoding)?,
            entrypoint: read_word(&mut cur, encoding)?,
            program_header_offset: read_word(&mut cur, encoding)?,
            section_header_offset: read_word(&mut cur, encoding)?,
            flags: read_word(&mut cur, encoding)?,
            header_size: read_word(&mut cur, encoding)?,
            program_header_entry_size: read_word(&mut cur, encoding)?,
            program_header_entry_count: read_word(&mut cur, encoding)?,
            section_header_entry_size: read_word(&mut cur, encoding)?,
            section_header_entry_count: read_word(&mut cur, encoding)?,
            section_header_string_index: read_word(&mut cur, encoding)?,
        })
    }
}
