//! Builds synthetic ELF headers byte by byte.

#![allow(dead_code)]

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

pub const MACHINES: [u16; 10] = [0x02, 0x03, 0x08, 0x14, 0x28, 0x2a, 0x32, 0x3e, 0xb7, 0xf3];

/// Raw field values; nothing here is validated, so fixtures can describe
/// broken headers as easily as good ones.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub magic: [u8; 4],
    pub class: u8,
    pub encoding: u8,
    pub ident_version: u8,
    pub abi: u8,
    pub abi_version: u8,
    pub padding: [u8; 7],
    pub object_type: u16,
    pub machine: u16,
    pub version: u32,
    pub entrypoint: u64,
    pub program_header_offset: u64,
    pub section_header_offset: u64,
    pub flags: u32,
    pub program_header_entry_size: u16,
    pub program_header_entry_count: u16,
    pub section_header_entry_size: u16,
    pub section_header_entry_count: u16,
    pub section_header_string_index: u16,
}

impl Fixture {
    /// A little-endian System V AMD64 executable.
    pub fn elf64() -> Self {
        Fixture {
            magic: [0x7f, b'E', b'L', b'F'],
            class: 2,
            encoding: 1,
            ident_version: 1,
            abi: 0,
            abi_version: 0,
            padding: [0; 7],
            object_type: 2,
            machine: 0x3e,
            version: 1,
            entrypoint: 0x0040_1040,
            program_header_offset: 64,
            section_header_offset: 0x3a28,
            flags: 0,
            program_header_entry_size: 56,
            program_header_entry_count: 13,
            section_header_entry_size: 64,
            section_header_entry_count: 31,
            section_header_string_index: 30,
        }
    }

    /// A big-endian Linux PowerPC executable.
    pub fn elf32() -> Self {
        Fixture {
            class: 1,
            encoding: 2,
            abi: 3,
            machine: 0x14,
            entrypoint: 0x1000_0400,
            program_header_offset: 52,
            section_header_offset: 0x1f34,
            flags: 0x8000,
            program_header_entry_size: 32,
            program_header_entry_count: 8,
            section_header_entry_size: 40,
            section_header_entry_count: 27,
            section_header_string_index: 26,
            ..Fixture::elf64()
        }
    }

    pub fn header_size(&self) -> u16 {
        if self.class == 1 {
            52
        } else {
            64
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self.encoding {
            2 => self.encode::<BigEndian>(),
            _ => self.encode::<LittleEndian>(),
        }
    }

    fn encode<B: ByteOrder>(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&self.magic);
        buf.extend_from_slice(&[
            self.class,
            self.encoding,
            self.ident_version,
            self.abi,
            self.abi_version,
        ]);
        buf.extend_from_slice(&self.padding);

        buf.write_u16::<B>(self.object_type).unwrap();
        buf.write_u16::<B>(self.machine).unwrap();
        buf.write_u32::<B>(self.version).unwrap();
        for address in [
            self.entrypoint,
            self.program_header_offset,
            self.section_header_offset,
        ] {
            if self.class == 1 {
                buf.write_u32::<B>(address as u32).unwrap();
            } else {
                buf.write_u64::<B>(address).unwrap();
            }
        }
        buf.write_u32::<B>(self.flags).unwrap();
        for half in [
            self.header_size(),
            self.program_header_entry_size,
            self.program_header_entry_count,
            self.section_header_entry_size,
            self.section_header_entry_count,
            self.section_header_string_index,
        ] {
            buf.write_u16::<B>(half).unwrap();
        }

        assert_eq!(buf.len(), usize::from(self.header_size()));
        buf
    }
}
