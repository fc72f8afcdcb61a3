use std::path::Path;

use elfguard_core::{read_header, Class, ElfHeader, Header, Machine, TableLocation};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(field: &'static str, value: impl ToString) -> FieldRow {
    FieldRow {
        field,
        value: value.to_string(),
    }
}

pub fn header_table(header: &ElfHeader) -> String {
    let ident = header.ident();
    let rows = vec![
        row("Class", header.class()),
        row("Data encoding", header.encoding()),
        row("ABI", format!("{} (version {})", ident.abi, ident.abi_version)),
        row("Type", header.object_type()),
        row("Machine", header.machine()),
        row("Version", format!("{:#x}", header.version())),
        row("Entry point", format!("{:#x}", header.entrypoint())),
        row("Program headers offset", header.program_header_offset()),
        row("Section headers offset", header.section_header_offset()),
        row("Flags", format!("{:#x}", header.flags())),
        row("Header size", header.header_size()),
        row("Program header size", header.program_header_entry_size()),
        row("Program header count", header.program_header_entry_count()),
        row("Section header size", header.section_header_entry_size()),
        row("Section header count", header.section_header_entry_count()),
        row("Section name index", header.section_header_string_index()),
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Table")]
    name: &'static str,
    #[tabled(rename = "Offset")]
    offset: String,
    #[tabled(rename = "Entry size")]
    entry_size: u16,
    #[tabled(rename = "Count")]
    count: u16,
}

impl TableRow {
    fn new(name: &'static str, location: TableLocation) -> Self {
        Self {
            name,
            offset: format!("{:#x}", location.offset),
            entry_size: location.entry_size,
            count: location.count,
        }
    }
}

pub fn tables_table(header: &ElfHeader) -> String {
    let rows = [
        TableRow::new("program headers", header.program_header_table()),
        TableRow::new("section headers", header.section_header_table()),
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Result of checking one file.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub path: String,
    pub ok: bool,
    /// `"ok"`, the header error kind, or `"unreadable"`.
    pub status: &'static str,
    pub class: Option<Class>,
    pub machine: Option<Machine>,
}

impl CheckReport {
    pub fn run(path: &Path) -> Self {
        let outcome = std::fs::read(path)
            .map_err(|err| {
                log::warn!("failed to read {}: {err}", path.display());
                "unreadable"
            })
            .and_then(|buf| read_header(&buf).map_err(|err| err.kind_name()));

        let path = path.display().to_string();
        match outcome {
            Ok(header) => CheckReport {
                path,
                ok: true,
                status: "ok",
                class: Some(header.class()),
                machine: Some(header.machine()),
            },
            Err(status) => CheckReport {
                path,
                ok: false,
                status,
                class: None,
                machine: None,
            },
        }
    }
}
