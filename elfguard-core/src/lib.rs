//! Reads and validates the fixed-size header of ELF objects held in memory.
//!
//! [`read_header`] is the only entry point: it borrows a byte buffer for the
//! duration of the call and returns an owned, class-tagged [`ElfHeader`] or
//! one of the two [`Error`] kinds.
//!
//! ```
//! let mut buf = [0u8; 64];
//! buf[..4].copy_from_slice(&elfguard_core::ELF_MAGIC);
//! buf[4] = 2; // 64-bit
//! buf[5] = 1; // little-endian
//! buf[6] = 1; // current version
//! buf[16] = 2; // executable
//! buf[18] = 0x3e; // AMD64
//!
//! let header = elfguard_core::read_header(&buf)?;
//! assert_eq!(header.class(), elfguard_core::Class::Elf64);
//! # Ok::<(), elfguard_core::Error>(())
//! ```

mod error;
mod guard;
pub mod header;
mod ident;
mod layout;
mod reader;
mod validate;

pub use error::{Error, Result, Unrecognized};
pub use header::elf::{ElfHeader, Header32, Header64, HeaderLayout};
pub use header::{Header, TableLocation};
pub use ident::{
    Abi, Class, Encoding, Ident, Version, ELF32_HEADER_SIZE, ELF64_HEADER_SIZE, ELF_MAGIC,
    IDENT_SIZE,
};
pub use reader::{read_header, read_header_with_length};
pub use validate::{Machine, ObjectType};
