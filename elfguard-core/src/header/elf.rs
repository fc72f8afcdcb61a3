use crate::error::Result;
use crate::header::{Header, TableLocation};
use crate::ident::{Abi, Class, Encoding, Ident};
use crate::validate::{Machine, ObjectType};

/// Validated ELF header fields, generic over the width of the address and
/// offset fields.
///
/// This is the consolidated form of `Elf32_Ehdr` / `Elf64_Ehdr`: both share
/// every field and differ only in the width of `entrypoint`,
/// `program_header_offset` and `section_header_offset`.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeaderLayout<A> {
    /// Identification block (class, byte order, version, ABI).
    pub ident: Ident,

    /// Object file type. Never [`ObjectType::None`] in a parsed header.
    pub object_type: ObjectType,

    /// Target architecture. Never [`Machine::None`] in a parsed header.
    pub machine: Machine,

    /// Object file version (`e_version`). Captured, not validated.
    pub version: u32,

    /// Virtual address execution starts at, or 0 if there is none.
    pub entrypoint: A,

    /// File offset of the program header table.
    pub program_header_offset: A,

    /// File offset of the section header table.
    pub section_header_offset: A,

    /// Processor-specific flags.
    pub flags: u32,

    /// Size of this header as declared by the file.
    pub header_size: u16,

    pub program_header_entry_size: u16,
    pub program_header_entry_count: u16,
    pub section_header_entry_size: u16,
    pub section_header_entry_count: u16,

    /// Index of the section header string table.
    pub section_header_string_index: u16,
}

pub type Header32 = HeaderLayout<u32>;
pub type Header64 = HeaderLayout<u64>;

/// A validated ELF header, tagged by class.
///
/// Owns all of its data; it holds no reference to the buffer it was read
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "class", content = "header"))]
pub enum ElfHeader {
    Elf32(Header32),
    Elf64(Header64),
}

macro_rules! common_field {
    ($self:ident, $field:ident) => {
        match $self {
            ElfHeader::Elf32(h) => h.$field,
            ElfHeader::Elf64(h) => h.$field,
        }
    };
}

macro_rules! address_field {
    ($self:ident, $field:ident) => {
        match $self {
            ElfHeader::Elf32(h) => u64::from(h.$field),
            ElfHeader::Elf64(h) => h.$field,
        }
    };
}

impl ElfHeader {
    /// Reads and validates the header at the start of `buffer`.
    ///
    /// Same as [`crate::read_header`].
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        crate::read_header(buffer)
    }

    pub fn class(&self) -> Class {
        match self {
            ElfHeader::Elf32(_) => Class::Elf32,
            ElfHeader::Elf64(_) => Class::Elf64,
        }
    }

    pub fn as_elf32(&self) -> Option<&Header32> {
        match self {
            ElfHeader::Elf32(h) => Some(h),
            ElfHeader::Elf64(_) => None,
        }
    }

    pub fn as_elf64(&self) -> Option<&Header64> {
        match self {
            ElfHeader::Elf32(_) => None,
            ElfHeader::Elf64(h) => Some(h),
        }
    }

    pub fn ident(&self) -> &Ident {
        match self {
            ElfHeader::Elf32(h) => &h.ident,
            ElfHeader::Elf64(h) => &h.ident,
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.ident().encoding
    }

    pub fn abi(&self) -> Abi {
        self.ident().abi
    }

    pub fn abi_version(&self) -> u8 {
        self.ident().abi_version
    }

    pub fn object_type(&self) -> ObjectType {
        common_field!(self, object_type)
    }

    pub fn machine(&self) -> Machine {
        common_field!(self, machine)
    }

    pub fn version(&self) -> u32 {
        common_field!(self, version)
    }

    /// Entry point address, widened to 64 bits.
    pub fn entrypoint(&self) -> u64 {
        address_field!(self, entrypoint)
    }

    pub fn program_header_offset(&self) -> u64 {
        address_field!(self, program_header_offset)
    }

    pub fn section_header_offset(&self) -> u64 {
        address_field!(self, section_header_offset)
    }

    pub fn flags(&self) -> u32 {
        common_field!(self, flags)
    }

    pub fn header_size(&self) -> u16 {
        common_field!(self, header_size)
    }

    pub fn program_header_entry_size(&self) -> u16 {
        common_field!(self, program_header_entry_size)
    }

    pub fn program_header_entry_count(&self) -> u16 {
        common_field!(self, program_header_entry_count)
    }

    pub fn section_header_entry_size(&self) -> u16 {
        common_field!(self, section_header_entry_size)
    }

    pub fn section_header_entry_count(&self) -> u16 {
        common_field!(self, section_header_entry_count)
    }

    pub fn section_header_string_index(&self) -> u16 {
        common_field!(self, section_header_string_index)
    }
}

impl Header for ElfHeader {
    fn class(&self) -> Class {
        ElfHeader::class(self)
    }

    fn entry_point(&self) -> u64 {
        self.entrypoint()
    }

    fn machine(&self) -> Machine {
        ElfHeader::machine(self)
    }

    fn object_type(&self) -> ObjectType {
        ElfHeader::object_type(self)
    }

    fn format_name(&self) -> &'static str {
        "ELF"
    }

    fn is_executable(&self) -> bool {
        ElfHeader::object_type(self) == ObjectType::Executable
    }

    fn program_header_table(&self) -> TableLocation {
        TableLocation {
            offset: self.program_header_offset(),
            entry_size: self.program_header_entry_size(),
            count: self.program_header_entry_count(),
        }
    }

    fn section_header_table(&self) -> TableLocation {
        TableLocation {
            offset: self.section_header_offset(),
            entry_size: self.section_header_entry_size(),
            count: self.section_header_entry_count(),
        }
    }
}
