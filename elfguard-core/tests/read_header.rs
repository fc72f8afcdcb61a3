mod common;

use common::Fixture;
use elfguard_core::{
    read_header, read_header_with_length, Abi, Class, ElfHeader, Encoding, Error, Header,
    Machine, ObjectType, ELF32_HEADER_SIZE, ELF64_HEADER_SIZE,
};

#[test]
fn amd64_executable_is_accepted() {
    let buf = Fixture::elf64().to_bytes();
    assert_eq!(buf.len(), ELF64_HEADER_SIZE);

    let header = read_header(&buf).unwrap();
    assert_eq!(header.class(), Class::Elf64);
    assert_eq!(header.object_type(), ObjectType::Executable);
    assert_eq!(header.machine(), Machine::Amd64);
    assert_eq!(header.abi(), Abi::SystemV);
    assert_eq!(header.encoding(), Encoding::Little);
    assert_eq!(header.entrypoint(), 0x0040_1040);
    assert_eq!(header.program_header_offset(), 64);
    assert_eq!(header.section_header_offset(), 0x3a28);
    assert_eq!(header.header_size(), 64);
    assert_eq!(header.program_header_entry_count(), 13);
    assert_eq!(header.section_header_string_index(), 30);
}

#[test]
fn unset_class_is_invalid_data() {
    let mut buf = Fixture::elf64().to_bytes();
    buf[4] = 0;
    assert_eq!(read_header(&buf), Err(Error::InvalidData));
}

#[test]
fn ten_bytes_is_invalid_arguments() {
    let buf = Fixture::elf64().to_bytes();
    assert_eq!(read_header(&buf[..10]), Err(Error::InvalidArguments));
    assert_eq!(read_header(&[0u8; 10]), Err(Error::InvalidArguments));
}

#[test]
fn elf32_needs_the_full_32_bit_layout() {
    let buf = Fixture::elf32().to_bytes();
    assert_eq!(buf.len(), ELF32_HEADER_SIZE);

    for len in 16..ELF32_HEADER_SIZE {
        assert_eq!(read_header(&buf[..len]), Err(Error::InvalidArguments), "len {len}");
    }

    let header = read_header(&buf).unwrap();
    assert_eq!(header.class(), Class::Elf32);
    assert_eq!(header.abi(), Abi::Linux);
    assert_eq!(header.machine(), Machine::PowerPc);
    assert_eq!(header.flags(), 0x8000);
}

#[test]
fn elf64_needs_the_full_64_bit_layout() {
    let buf = Fixture::elf64().to_bytes();
    assert_eq!(read_header(&buf[..63]), Err(Error::InvalidArguments));
    assert_eq!(read_header(&buf[..52]), Err(Error::InvalidArguments));
}

#[test]
fn big_endian_fields_decode_to_intended_values() {
    let mut fixture = Fixture::elf64();
    fixture.encoding = 2;
    fixture.entrypoint = 0x0123_4567_89ab_cdef;
    fixture.program_header_offset = 0x40;
    fixture.section_header_offset = 0x00ff_0000_0000_1000;
    fixture.flags = 0xdead_beef;

    let header = read_header(&fixture.to_bytes()).unwrap();
    assert_eq!(header.encoding(), Encoding::Big);
    assert_eq!(header.entrypoint(), 0x0123_4567_89ab_cdef);
    assert_eq!(header.program_header_offset(), 0x40);
    assert_eq!(header.section_header_offset(), 0x00ff_0000_0000_1000);
    assert_eq!(header.flags(), 0xdead_beef);
}

#[test]
fn both_encodings_yield_the_same_fields() {
    for base in [Fixture::elf32(), Fixture::elf64()] {
        let mut little = base.clone();
        little.encoding = 1;
        let mut big = base;
        big.encoding = 2;

        let little = read_header(&little.to_bytes()).unwrap();
        let big = read_header(&big.to_bytes()).unwrap();

        assert_ne!(little.encoding(), big.encoding());
        assert_eq!(little.entrypoint(), big.entrypoint());
        assert_eq!(little.program_header_offset(), big.program_header_offset());
        assert_eq!(little.section_header_offset(), big.section_header_offset());
        assert_eq!(little.flags(), big.flags());
        assert_eq!(little.program_header_table(), big.program_header_table());
        assert_eq!(little.section_header_table(), big.section_header_table());
    }
}

#[test]
fn bad_magic_is_invalid_data() {
    for index in 0..4 {
        let mut buf = Fixture::elf64().to_bytes();
        buf[index] ^= 0x20;
        assert_eq!(read_header(&buf), Err(Error::InvalidData), "byte {index}");
    }
}

#[test]
fn ident_tags_are_checked() {
    let cases: [(usize, u8); 5] = [(4, 3), (5, 0), (5, 3), (6, 0), (6, 2)];
    for (index, value) in cases {
        let mut buf = Fixture::elf64().to_bytes();
        buf[index] = value;
        assert_eq!(read_header(&buf), Err(Error::InvalidData), "byte {index} = {value}");
    }
}

#[test]
fn padding_does_not_affect_acceptance() {
    let mut fixture = Fixture::elf64();
    fixture.padding = [0xff; 7];
    let header = read_header(&fixture.to_bytes()).unwrap();
    assert_eq!(header.ident().padding, [0xff; 7]);
}

#[test]
fn every_object_type_but_none_is_accepted() {
    let mut fixture = Fixture::elf64();
    for (raw, expected) in [
        (1, ObjectType::Relocatable),
        (2, ObjectType::Executable),
        (3, ObjectType::Dynamic),
        (4, ObjectType::Core),
    ] {
        fixture.object_type = raw;
        assert_eq!(read_header(&fixture.to_bytes()).unwrap().object_type(), expected);
    }

    for raw in [0, 5, 0xfe00, 0xff00, 0xffff] {
        fixture.object_type = raw;
        assert_eq!(read_header(&fixture.to_bytes()), Err(Error::InvalidData), "type {raw:#x}");
    }
}

#[test]
fn every_supported_machine_is_accepted() {
    let mut fixture = Fixture::elf32();
    for raw in common::MACHINES {
        fixture.machine = raw;
        let header = read_header(&fixture.to_bytes()).unwrap();
        assert_eq!(header.machine() as u16, raw);
    }

    fixture.machine = 0;
    assert_eq!(read_header(&fixture.to_bytes()), Err(Error::InvalidData));
}

#[test]
fn abi_outside_the_known_set_is_invalid_data() {
    let mut fixture = Fixture::elf64();
    for raw in (0u8..=18).filter(|raw| *raw != 5) {
        fixture.abi = raw;
        assert_eq!(read_header(&fixture.to_bytes()).unwrap().abi() as u8, raw);
    }
    for raw in [5u8, 19, 64, 97, 255] {
        fixture.abi = raw;
        assert_eq!(read_header(&fixture.to_bytes()), Err(Error::InvalidData), "abi {raw}");
    }
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut buf = Fixture::elf64().to_bytes();
    let expected = read_header(&buf).unwrap();
    buf.extend_from_slice(&[0xcc; 4096]);
    assert_eq!(read_header(&buf), Ok(expected));
}

#[test]
fn declared_length_bounds_the_read() {
    let mut buf = Fixture::elf64().to_bytes();
    buf.extend_from_slice(&[0; 16]);

    assert!(read_header_with_length(&buf, 64).is_ok());
    assert_eq!(read_header_with_length(&buf, 63), Err(Error::InvalidArguments));
    assert_eq!(read_header_with_length(&buf, 10), Err(Error::InvalidArguments));
    assert_eq!(
        read_header_with_length(&buf, buf.len() + 1),
        Err(Error::InvalidArguments)
    );
}

#[test]
fn repeated_reads_are_identical() {
    let buf = Fixture::elf32().to_bytes();
    let first = read_header(&buf);
    let second = read_header(&buf);
    assert_eq!(first, second);
    assert_eq!(ElfHeader::parse(&buf), first);
}

#[test]
fn header_outlives_its_buffer() {
    let header = {
        let buf = Fixture::elf64().to_bytes();
        read_header(&buf).unwrap()
    };
    assert_eq!(header.entrypoint(), 0x0040_1040);
}

#[test]
fn headers_can_cross_threads() {
    let buf = Fixture::elf64().to_bytes();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let buf = buf.clone();
            std::thread::spawn(move || read_header(&buf))
        })
        .collect();

    let expected = read_header(&buf);
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn boxed_trait_object_for_downstream_use() {
    let header: Box<dyn Header> = Box::new(read_header(&Fixture::elf64().to_bytes()).unwrap());
    assert!(header.is_64());
    assert!(header.is_executable());
    assert_eq!(header.entry_point(), 0x0040_1040);
    assert_eq!(header.program_header_table().entry_size, 56);
}
