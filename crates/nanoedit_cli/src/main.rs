//! Companion diagnostics CLI for nanoedit.
//!
//! Read-only utilities that sit beside the editor: `info` prints the file
//! report produced by the core, `cat` dumps a file without opening an
//! editing session. Exits non-zero when the requested path cannot be read.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use nanoedit_core::fileinfo::{describe, ContentEncoding, FileReport};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nedit", about = "nanoedit file diagnostics", version)]
struct Cli {
    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Report filesystem metadata and content statistics for a path
    Info { path: PathBuf },
    /// Print a file's contents without opening an editing session
    Cat { path: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nanoedit=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("nedit: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut io::stdout());
            Ok(())
        }
        Commands::Info { path } => {
            let report = describe(&path)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_report(&report));
            }
            Ok(())
        }
        Commands::Cat { path } => {
            let raw = std::fs::read(&path)?;
            print!("{}", String::from_utf8_lossy(&raw));
            Ok(())
        }
    }
}

fn encoding_label(encoding: ContentEncoding) -> &'static str {
    match encoding {
        ContentEncoding::Utf8 => "utf-8",
        ContentEncoding::Utf8Bom => "utf-8 (BOM)",
        ContentEncoding::Utf16 => "utf-16",
        ContentEncoding::Binary => "binary",
    }
}

fn format_report(report: &FileReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("File information: {}\n", report.path.display()));
    out.push_str(&format!("Is file: {}\n", report.is_file));
    out.push_str(&format!("Is directory: {}\n", report.is_dir));
    out.push_str(&format!("Size: {} bytes\n", report.size));
    for (label, time) in [
        ("Created", report.created),
        ("Modified", report.modified),
        ("Accessed", report.accessed),
    ] {
        if let Some(time) = time {
            out.push_str(&format!("{}: {}\n", label, time.to_rfc3339()));
        }
    }
    if let Some(permissions) = &report.permissions {
        out.push_str(&format!("Permissions: {}\n", permissions));
    }
    out.push_str(&format!(
        "MIME type: {}\n",
        report.mime.unwrap_or("unknown")
    ));
    if let Some(encoding) = report.encoding {
        out.push_str(&format!("Encoding: {}\n", encoding_label(encoding)));
    }
    if let Some(stats) = report.stats {
        out.push_str(&format!(
            "Lines: {}  Words: {}  Chars: {}\n",
            stats.lines, stats.words, stats.chars
        ));
    }
    if let Some(hash) = &report.content_hash {
        out.push_str(&format!("BLAKE3: {}\n", hash));
    }
    out
}
