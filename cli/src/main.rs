//! safefs - durable file writes from the shell
//!
//! A thin command-line front end over the safefs library.

use clap::{Parser, Subcommand, ValueEnum};
use safefs::{
    DEFAULT_MODE, EntryKind, Error as SafefsError, ErrorCode, WriteOptions, copy_file_with,
    durable_write_with, entry_kind,
};
use serde_json::{Value, json};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// safefs - durable writes, mode-exact copies and typed existence checks
///
/// Usage:
///   producer | safefs write PATH
///   safefs copy SOURCE DEST
///   safefs exists --kind dir PATH
#[derive(Parser, Debug)]
#[command(name = "safefs", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    output: OutputMode,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Atomically replace PATH with the content of stdin (or --input)
    Write {
        /// File to replace
        path: PathBuf,

        /// Permission bits of the result, in octal
        #[arg(short = 'm', long, default_value = "644", value_parser = parse_mode)]
        mode: u32,

        /// Read content from this file instead of stdin ("-" for stdin)
        #[arg(short = 'i', long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Do not fsync data or directory (faster but less safe)
        #[arg(long)]
        no_sync: bool,
    },

    /// Copy SOURCE to DEST with an exact mode
    Copy {
        /// File to read
        source: PathBuf,

        /// File to create or overwrite
        dest: PathBuf,

        /// Permission bits of DEST, in octal
        #[arg(short = 'm', long, default_value = "644", value_parser = parse_mode)]
        mode: u32,

        /// Do not fsync DEST after writing (faster but less safe)
        #[arg(long)]
        no_sync: bool,
    },

    /// Exit 0 if PATH exists and is of the given kind, 1 otherwise
    Exists {
        /// Path to check
        path: PathBuf,

        /// Expected entry kind
        #[arg(short = 'k', long, value_enum, default_value = "file")]
        kind: KindArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Regular file
    #[value(alias = "f")]
    File,
    /// Directory
    #[value(aliases = ["directory", "d"])]
    Dir,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::File => EntryKind::File,
            KindArg::Dir => EntryKind::Directory,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    let mode = u32::from_str_radix(digits, 8)
        .map_err(|_| format!("'{s}' is not an octal mode such as 644 or 0o600"))?;
    if mode > 0o7777 {
        return Err(format!("mode '{s}' is out of range (max 7777)"));
    }
    Ok(mode)
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read input: {path}: {source}")]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("Failed to write file: {path}: {source}")]
    Write { path: PathBuf, source: SafefsError },

    #[error("Failed to copy {src} to {dst}: {source}")]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        source: SafefsError,
    },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::ReadInput { source, .. } => ErrorCode::from_io(source),
            Self::Write { source, .. } | Self::Copy { source, .. } => source.code(),
            Self::JsonSerialize { .. } => ErrorCode::IoError,
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        _ => 1,
    }
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("error[{}]: {}", error.code(), error);
            std::process::exit(exit_code_for(error.code()));
        }
    }
}

/// Returns whether the command succeeded; only `exists` can report `false`.
fn run() -> CliResult<bool> {
    let args = Args::parse();

    match args.command {
        Command::Write {
            path,
            mode,
            input,
            no_sync,
        } => {
            let content = read_input(input.as_deref())?;
            durable_write_with(&content, &path, mode, &write_options(no_sync))
                .map_err(|source| CliError::Write {
                    path: path.clone(),
                    source,
                })?;
            report(
                args.output,
                format!(
                    "Wrote {} to {} (mode {:o})",
                    format_bytes(content.len() as u64),
                    display_path(&path),
                    mode
                ),
                json!({
                    "operation": "write",
                    "path": display_path(&path),
                    "bytes": content.len(),
                    "mode": format!("{:o}", mode),
                }),
            )?;
            Ok(true)
        }
        Command::Copy {
            source,
            dest,
            mode,
            no_sync,
        } => {
            let bytes = copy_file_with(&source, &dest, mode, &write_options(no_sync)).map_err(
                |error| CliError::Copy {
                    src: source.clone(),
                    dst: dest.clone(),
                    source: error,
                },
            )?;
            report(
                args.output,
                format!(
                    "Copied {}: {} -> {} (mode {:o})",
                    format_bytes(bytes),
                    display_path(&source),
                    display_path(&dest),
                    mode
                ),
                json!({
                    "operation": "copy",
                    "source": display_path(&source),
                    "destination": display_path(&dest),
                    "bytes": bytes,
                    "mode": format!("{:o}", mode),
                }),
            )?;
            Ok(true)
        }
        Command::Exists { path, kind } => {
            let wanted = EntryKind::from(kind);
            let actual = entry_kind(&path);
            let matches = actual == Some(wanted);
            report(
                args.output,
                matches.to_string(),
                json!({
                    "path": display_path(&path),
                    "kind": wanted.to_string(),
                    "actual": actual.map(|k| k.to_string()),
                    "exists": matches,
                }),
            )?;
            Ok(matches)
        }
    }
}

fn write_options(no_sync: bool) -> WriteOptions {
    let options = WriteOptions::default().with_warn_handler(print_warning);
    if no_sync {
        options.without_fsync().without_dir_sync()
    } else {
        options
    }
}

fn print_warning(msg: &str) {
    eprintln!("warning: {msg}");
}

fn read_input(input: Option<&Path>) -> CliResult<Vec<u8>> {
    match input {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).map_err(|source| CliError::ReadInput {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut content = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut content)
                .map_err(|source| CliError::ReadInput {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(content)
        }
    }
}

fn report(output: OutputMode, human: String, value: Value) -> CliResult<()> {
    match output {
        OutputMode::Human => {
            println!("{human}");
            Ok(())
        }
        OutputMode::Json => print_json_value(&value),
    }
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
