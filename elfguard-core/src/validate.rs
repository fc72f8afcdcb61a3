use std::fmt;

use crate::error::{reject, Error, Result, Unrecognized};
use crate::header::elf::HeaderLayout;
use crate::ident::{Abi, Ident, IdentBlock};
use crate::layout::RawLayout;

/// Object file type (`e_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u16)]
pub enum ObjectType {
    None = 0,
    Relocatable = 1,
    Executable = 2,
    /// Shared object or position-independent executable.
    Dynamic = 3,
    Core = 4,
}

impl TryFrom<u16> for ObjectType {
    type Error = Unrecognized;

    fn try_from(raw: u16) -> std::result::Result<Self, Self::Error> {
        match raw {
            0 => Ok(ObjectType::None),
            1 => Ok(ObjectType::Relocatable),
            2 => Ok(ObjectType::Executable),
            3 => Ok(ObjectType::Dynamic),
            4 => Ok(ObjectType::Core),
            _ => Err(Unrecognized::new("object type", raw)),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::None => "none",
            ObjectType::Relocatable => "relocatable",
            ObjectType::Executable => "executable",
            ObjectType::Dynamic => "dynamic",
            ObjectType::Core => "core",
        };
        write!(f, "{}", name)
    }
}

/// Target instruction set (`e_machine`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u16)]
pub enum Machine {
    None = 0x00,
    Sparc = 0x02,
    I386 = 0x03,
    Mips = 0x08,
    PowerPc = 0x14,
    Arm = 0x28,
    SuperH = 0x2a,
    Ia64 = 0x32,
    Amd64 = 0x3e,
    AArch64 = 0xb7,
    RiscV = 0xf3,
}

impl TryFrom<u16> for Machine {
    type Error = Unrecognized;

    fn try_from(raw: u16) -> std::result::Result<Self, Self::Error> {
        match raw {
            0x00 => Ok(Machine::None),
            0x02 => Ok(Machine::Sparc),
            0x03 => Ok(Machine::I386),
            0x08 => Ok(Machine::Mips),
            0x14 => Ok(Machine::PowerPc),
            0x28 => Ok(Machine::Arm),
            0x2a => Ok(Machine::SuperH),
            0x32 => Ok(Machine::Ia64),
            0x3e => Ok(Machine::Amd64),
            0xb7 => Ok(Machine::AArch64),
            0xf3 => Ok(Machine::RiscV),
            _ => Err(Unrecognized::new("machine", raw)),
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Machine::None => "none",
            Machine::Sparc => "SPARC",
            Machine::I386 => "i386",
            Machine::Mips => "MIPS",
            Machine::PowerPc => "PowerPC",
            Machine::Arm => "ARM",
            Machine::SuperH => "SuperH",
            Machine::Ia64 => "IA-64",
            Machine::Amd64 => "AMD64",
            Machine::AArch64 => "AArch64",
            Machine::RiscV => "RISC-V",
        };
        write!(f, "{}", name)
    }
}

/// Applies the closed-set checks on type, machine and ABI, in that order,
/// and assembles the normalized layout.
pub(crate) fn validate<A>(ident: IdentBlock, raw: RawLayout<A>) -> Result<HeaderLayout<A>> {
    let object_type = ObjectType::try_from(raw.object_type).map_err(reject)?;
    if object_type == ObjectType::None {
        log::debug!("rejecting ELF header: object type is unset");
        return Err(Error::InvalidData);
    }

    let machine = Machine::try_from(raw.machine).map_err(reject)?;
    if machine == Machine::None {
        log::debug!("rejecting ELF header: machine is unset");
        return Err(Error::InvalidData);
    }

    let abi = Abi::try_from(ident.abi).map_err(reject)?;

    Ok(HeaderLayout {
        ident: Ident {
            class: ident.class,
            encoding: ident.encoding,
            version: ident.version,
            abi,
            abi_version: ident.abi_version,
            padding: ident.padding,
        },
        object_type,
        machine,
        version: raw.version,
        entrypoint: raw.entrypoint,
        program_header_offset: raw.program_header_offset,
        section_header_offset: raw.section_header_offset,
        flags: raw.flags,
        header_size: raw.header_size,
        program_header_entry_size: raw.program_header_entry_size,
        program_header_entry_count: raw.program_header_entry_count,
        section_header_entry_size: raw.section_header_entry_size,
        section_header_entry_count: raw.section_header_entry_count,
        section_header_string_index: raw.section_header_string_index,
    })
}
