use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use elfguard_core::{read_header, ElfHeader, Header};

mod render;

/// ELF header verification CLI
#[derive(Parser)]
#[command(
    name = "elfguard",
    about = "Validate ELF headers and show what they declare",
    version,
    author
)]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show entry point of binary
    Entry {
        /// Path to binary file
        path: PathBuf,
    },
    /// Show every field of the validated header
    Header {
        /// Path to binary file
        path: PathBuf,
    },
    /// Show where the program and section header tables live
    Tables {
        /// Path to binary file
        path: PathBuf,
    },
    /// Validate one or more files, exiting non-zero if any is rejected
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn load(path: &Path) -> Result<ElfHeader> {
    let buf = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    log::debug!("read {} bytes from {}", buf.len(), path.display());

    read_header(&buf).with_context(|| format!("{} has no valid ELF header", path.display()))
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::Entry { path } => {
            let header = load(&path)?;
            if cli.json {
                println!("{}", serde_json::json!({ "entry_point": header.entry_point() }));
            } else {
                println!("Entry point: 0x{:x}", header.entry_point());
            }
        }

        Command::Header { path } => {
            let header = load(&path)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&header)?);
            } else {
                println!("{}", render::header_table(&header));
            }
        }

        Command::Tables { path } => {
            let header = load(&path)?;
            if cli.json {
                let tables = serde_json::json!({
                    "program_headers": header.program_header_table(),
                    "section_headers": header.section_header_table(),
                });
                println!("{}", serde_json::to_string_pretty(&tables)?);
            } else {
                println!("{}", render::tables_table(&header));
            }
        }

        Command::Check { paths } => {
            let reports: Vec<_> = paths.iter().map(|p| render::CheckReport::run(p)).collect();
            let failed = reports.iter().filter(|r| !r.ok).count();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    let status = format!("{:<18}", report.status);
                    let status = if report.ok {
                        status.green().bold()
                    } else {
                        status.red().bold()
                    };
                    println!("{} {}", status, report.path);
                }
            }

            if failed > 0 {
                log::warn!("{failed} of {} file(s) rejected", reports.len());
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
