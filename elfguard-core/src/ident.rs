//! The 16-byte identification block shared by both ELF classes.
//!
//! Everything in here is read one byte at a time, so it can run before the
//! class and byte order of the rest of the header are known.

use std::fmt;

use crate::error::{reject, Result, Unrecognized};
use crate::guard;

/// `0x7F 'E' 'L' 'F'`
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// Size of the identification block (`EI_NIDENT`).
pub const IDENT_SIZE: usize = 16;

/// Size of a complete 32-bit ELF header.
pub const ELF32_HEADER_SIZE: usize = 52;

/// Size of a complete 64-bit ELF header.
pub const ELF64_HEADER_SIZE: usize = 64;

const EI_CLASS: usize = 4;
const EI_DATA: usize = 5;
const EI_VERSION: usize = 6;
const EI_OSABI: usize = 7;
const EI_ABIVERSION: usize = 8;
const EI_PAD: usize = 9;

/// Width of the address and offset fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Class {
    None = 0,
    Elf32 = 1,
    Elf64 = 2,
}

impl Class {
    /// Size of the full header for this class, `None` for [`Class::None`].
    pub const fn header_size(self) -> Option<usize> {
        match self {
            Class::None => None,
            Class::Elf32 => Some(ELF32_HEADER_SIZE),
            Class::Elf64 => Some(ELF64_HEADER_SIZE),
        }
    }
}

impl TryFrom<u8> for Class {
    type Error = Unrecognized;

    fn try_from(raw: u8) -> std::result::Result<Self, Self::Error> {
        match raw {
            0 => Ok(Class::None),
            1 => Ok(Class::Elf32),
            2 => Ok(Class::Elf64),
            _ => Err(Unrecognized::new("class", raw)),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Class::None => "none",
            Class::Elf32 => "ELF32",
            Class::Elf64 => "ELF64",
        };
        write!(f, "{}", name)
    }
}

/// Byte order of every multi-byte field after the identification block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Encoding {
    None = 0,
    Little = 1,
    Big = 2,
}

impl Encoding {
    /// Returns true if this matches the byte order of the host.
    pub fn is_native(self) -> bool {
        match self {
            Encoding::None => false,
            Encoding::Little => cfg!(target_endian = "little"),
            Encoding::Big => cfg!(target_endian = "big"),
        }
    }
}

impl TryFrom<u8> for Encoding {
    type Error = Unrecognized;

    fn try_from(raw: u8) -> std::result::Result<Self, Self::Error> {
        match raw {
            0 => Ok(Encoding::None),
            1 => Ok(Encoding::Little),
            2 => Ok(Encoding::Big),
            _ => Err(Unrecognized::new("data encoding", raw)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::None => "none",
            Encoding::Little => "little-endian",
            Encoding::Big => "big-endian",
        };
        write!(f, "{}", name)
    }
}

/// Identification version (`EI_VERSION`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Version {
    None = 0,
    Current = 1,
}

impl TryFrom<u8> for Version {
    type Error = Unrecognized;

    fn try_from(raw: u8) -> std::result::Result<Self, Self::Error> {
        match raw {
            0 => Ok(Version::None),
            1 => Ok(Version::Current),
            _ => Err(Unrecognized::new("version", raw)),
        }
    }
}

/// Operating system / ABI the object targets (`EI_OSABI`).
///
/// Raw value 5 has no assigned ABI and is rejected like any other unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Abi {
    SystemV = 0,
    HpUx = 1,
    NetBsd = 2,
    Linux = 3,
    Hurd = 4,
    Solaris = 6,
    Aix = 7,
    Irix = 8,
    FreeBsd = 9,
    Tru64 = 10,
    NovellModesto = 11,
    OpenBsd = 12,
    OpenVms = 13,
    NonStop = 14,
    Aros = 15,
    Fenix = 16,
    CloudAbi = 17,
    OpenVos = 18,
}

impl TryFrom<u8> for Abi {
    type Error = Unrecognized;

    fn try_from(raw: u8) -> std::result::Result<Self, Self::Error> {
        match raw {
            0 => Ok(Abi::SystemV),
            1 => Ok(Abi::HpUx),
            2 => Ok(Abi::NetBsd),
            3 => Ok(Abi::Linux),
            4 => Ok(Abi::Hurd),
            6 => Ok(Abi::Solaris),
            7 => Ok(Abi::Aix),
            8 => Ok(Abi::Irix),
            9 => Ok(Abi::FreeBsd),
            10 => Ok(Abi::Tru64),
            11 => Ok(Abi::NovellModesto),
            12 => Ok(Abi::OpenBsd),
            13 => Ok(Abi::OpenVms),
            14 => Ok(Abi::NonStop),
            15 => Ok(Abi::Aros),
            16 => Ok(Abi::Fenix),
            17 => Ok(Abi::CloudAbi),
            18 => Ok(Abi::OpenVos),
            _ => Err(Unrecognized::new("ABI", raw)),
        }
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Abi::SystemV => "System V",
            Abi::HpUx => "HP-UX",
            Abi::NetBsd => "NetBSD",
            Abi::Linux => "Linux",
            Abi::Hurd => "GNU Hurd",
            Abi::Solaris => "Solaris",
            Abi::Aix => "AIX",
            Abi::Irix => "IRIX",
            Abi::FreeBsd => "FreeBSD",
            Abi::Tru64 => "Tru64",
            Abi::NovellModesto => "Novell Modesto",
            Abi::OpenBsd => "OpenBSD",
            Abi::OpenVms => "OpenVMS",
            Abi::NonStop => "NonStop Kernel",
            Abi::Aros => "AROS",
            Abi::Fenix => "FenixOS",
            Abi::CloudAbi => "CloudABI",
            Abi::OpenVos => "OpenVOS",
        };
        write!(f, "{}", name)
    }
}

/// Validated identification block as carried by the normalized header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ident {
    pub class: Class,
    pub encoding: Encoding,
    pub version: Version,
    pub abi: Abi,
    pub abi_version: u8,

    /// `EI_PAD` bytes, copied but never interpreted.
    pub padding: [u8; 7],
}

/// Identification block after the byte-level checks; the ABI byte is still
/// raw until the semantic pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IdentBlock {
    pub class: Class,
    pub encoding: Encoding,
    pub version: Version,
    pub abi: u8,
    pub abi_version: u8,
    pub padding: [u8; 7],
}

/// Checks magic, class, byte order and version.
///
/// The class-size guard runs as soon as the class byte resolves, so a short
/// buffer with a valid class is reported as [`crate::Error::InvalidArguments`]
/// even if later identification bytes are garbage.
pub(crate) fn parse_ident(buffer: &[u8]) -> Result<IdentBlock> {
    let ident = guard::check_ident(buffer)?;

    if ident[..ELF_MAGIC.len()] != ELF_MAGIC {
        log::debug!("rejecting ELF header: bad magic {:02x?}", &ident[..4]);
        return Err(crate::Error::InvalidData);
    }

    let class = Class::try_from(ident[EI_CLASS]).map_err(reject)?;
    let Some(header_size) = class.header_size() else {
        log::debug!("rejecting ELF header: class is unset");
        return Err(crate::Error::InvalidData);
    };
    guard::check_layout(buffer, header_size)?;

    let encoding = Encoding::try_from(ident[EI_DATA]).map_err(reject)?;
    if encoding == Encoding::None {
        log::debug!("rejecting ELF header: data encoding is unset");
        return Err(crate::Error::InvalidData);
    }

    let version = Version::try_from(ident[EI_VERSION]).map_err(reject)?;
    if version != Version::Current {
        log::debug!("rejecting ELF header: version is unset");
        return Err(crate::Error::InvalidData);
    }

    let mut padding = [0u8; 7];
    padding.copy_from_slice(&ident[EI_PAD..IDENT_SIZE]);

    log::trace!("identification ok: {class}, {encoding}");
    Ok(IdentBlock {
        class,
        encoding,
        version,
        abi: ident[EI_OSABI],
        abi_version: ident[EI_ABIVERSION],
        padding,
    })
}
