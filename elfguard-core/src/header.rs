pub mod elf;

use crate::ident::Class;
use crate::validate::{Machine, ObjectType};

/// Where a program or section header table sits in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableLocation {
    pub offset: u64,
    pub entry_size: u16,
    pub count: u16,
}

/// Read-only view of a validated header for loader stages that walk the
/// tables it points at.
pub trait Header: std::fmt::Debug + Send + Sync {
    /// Returns the class the header was decoded with.
    fn class(&self) -> Class;

    /// Returns the virtual address of the entry point.
    fn entry_point(&self) -> u64;

    /// Returns the machine architecture.
    fn machine(&self) -> Machine;

    fn object_type(&self) -> ObjectType;

    /// Returns true if this is a 64-bit binary.
    fn is_64(&self) -> bool {
        self.class() == Class::Elf64
    }

    /// Returns a short human-readable name, e.g. "ELF".
    fn format_name(&self) -> &'static str;

    /// Returns true if the binary represents an executable (vs object/lib).
    fn is_executable(&self) -> bool;

    fn program_header_table(&self) -> TableLocation;

    fn section_header_table(&self) -> TableLocation;
}
