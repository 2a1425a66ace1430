//! Main entry point for the zipcrack CLI application.
//!
//! Loads the target entry from the archive, runs the parallel search,
//! and persists the recovered password and decrypted content.

use anyhow::{Result, bail};
use chrono::Local;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

use zipcrack::{
    Alphabet, Cli, Coordinator, LocalFileReader, SearchOutcome, ZipEntryOracle, ZipFileEntry,
    ZipParser,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let reader = Arc::new(LocalFileReader::new(Path::new(&cli.archive))?);
    let parser = ZipParser::new(reader);
    let entries = parser.list_entries().await?;

    if cli.list {
        list_entries(&entries);
        return Ok(());
    }

    let entry = select_entry(&entries, cli.entry.as_deref())?;
    let oracle = Arc::new(ZipEntryOracle::load(&parser, entry).await?);
    let alphabet = Alphabet::parse(&cli.charset)?;

    let coordinator = Coordinator::new(alphabet, cli.length, oracle)?;

    // Translate Ctrl-C into cooperative cancellation; the workers wind
    // down on their own and the run is reported as aborted.
    let cancel = coordinator.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupt received, stopping workers...");
            cancel.request_cancel();
        }
    });

    if !cli.is_quiet() {
        println!(
            "Search started: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        println!(
            "Target: '{}' in {} ({} candidates across {} workers)",
            entry.file_name,
            cli.archive,
            format_count(coordinator.space_size()),
            coordinator.worker_count()
        );
    }

    let report = coordinator.run().await?;

    match report.outcome {
        SearchOutcome::Found { password, payload } => {
            if !cli.is_very_quiet() {
                println!("Password found: {password}");
            }
            tokio::fs::write(&cli.password_out, format!("{password}\n")).await?;
            tokio::fs::write(&cli.content_out, &payload).await?;
            if !cli.is_quiet() {
                println!(
                    "Password written to {}, content to {}",
                    cli.password_out.display(),
                    cli.content_out.display()
                );
            }
        }
        SearchOutcome::Exhausted => {
            eprintln!("No password found in the given space");
        }
        SearchOutcome::Aborted => {
            eprintln!("Search aborted");
        }
    }

    if !cli.is_very_quiet() {
        println!(
            "Total attempts: {}",
            format_count(report.attempts as u128)
        );
        println!("Elapsed: {:.2}s", report.elapsed.as_secs_f64());
    }

    Ok(())
}

/// Pick the target entry: by name if one was given, otherwise the
/// first encrypted file entry in the archive.
fn select_entry<'a>(entries: &'a [ZipFileEntry], name: Option<&str>) -> Result<&'a ZipFileEntry> {
    match name {
        Some(name) => entries
            .iter()
            .find(|e| e.file_name == name)
            .ok_or_else(|| anyhow::anyhow!("Entry '{name}' not found in archive")),
        None => {
            let Some(entry) = entries
                .iter()
                .find(|e| !e.is_directory && e.is_encrypted())
            else {
                bail!("Archive has no encrypted entries");
            };
            Ok(entry)
        }
    }
}

/// List archive entries with size, method and encryption status.
fn list_entries(entries: &[ZipFileEntry]) {
    println!("{:>10}  {:>8}  {:>9}  Name", "Length", "Method", "Encrypted");
    println!("{}", "-".repeat(50));
    for entry in entries {
        println!(
            "{:>10}  {:>8}  {:>9}  {}",
            entry.uncompressed_size,
            entry.compression_method.name(),
            if entry.is_encrypted() { "yes" } else { "no" },
            entry.file_name
        );
    }
}

/// Format a count with thousands separators, e.g. 60466176 -> "60,466,176".
fn format_count(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
