//! slatoc - TOC extraction for SLA page-layout documents

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use slatoc::config::{EXPECTED_FRAMES, EXPECTED_STYLES};
use slatoc::{HeadingEntry, ScanOptions, SyncConfig, extract_entries, read_sla};

#[derive(Parser)]
#[command(name = "slatoc")]
#[command(version, about = "TOC extraction for SLA page-layout documents", long_about = None)]
#[command(after_help = "EXAMPLES:
    slatoc entries book.sla           List extracted heading entries
    slatoc entries --json book.sla    Same, as JSON
    slatoc toc book.sla               Print the rendered TOC block
    slatoc check book.sla             Check expected frames and styles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the extracted heading entries
    Entries {
        /// Input SLA file
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Extract the rules headings instead of the background headings
        #[arg(long)]
        rules: bool,

        /// Keep scanning when a frame fails to resolve a label
        #[arg(long)]
        resilient: bool,
    },
    /// Print the rendered TOC block
    Toc {
        /// Input SLA file
        input: String,

        /// Render the rules TOC instead of the background TOC
        #[arg(long)]
        rules: bool,
    },
    /// Check that the expected frames and styles are present
    Check {
        /// Input SLA file
        input: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Entries {
            input,
            json,
            rules,
            resilient,
        } => entries(&input, json, rules, resilient),
        Command::Toc { input, rules } => toc(&input, rules),
        Command::Check { input } => check(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn extract(input: &str, rules: bool, resilient: bool) -> Result<Vec<HeadingEntry>, String> {
    let doc = read_sla(input).map_err(|e| e.to_string())?;
    let config = SyncConfig::default();
    let target = if rules { &config.rules } else { &config.background };
    let options = ScanOptions {
        resilient,
        ..ScanOptions::default()
    };
    extract_entries(&doc, &target.heading_styles, &options).map_err(|e| e.to_string())
}

fn entries(input: &str, json: bool, rules: bool, resilient: bool) -> Result<(), String> {
    let entries = extract(input, rules, resilient)?;
    if json {
        let out = serde_json::to_string_pretty(&entries).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        for entry in &entries {
            println!("{}\t{}\t{}", entry.level, entry.text, entry.page);
        }
    }
    Ok(())
}

fn toc(input: &str, rules: bool) -> Result<(), String> {
    for entry in extract(input, rules, false)? {
        println!("{}\t{}", entry.text, entry.page);
    }
    Ok(())
}

fn check(input: &str) -> Result<(), String> {
    let doc = read_sla(input).map_err(|e| e.to_string())?;

    let missing_frames = doc.missing_frames(EXPECTED_FRAMES);
    let missing_styles = doc.missing_styles(EXPECTED_STYLES);

    if missing_frames.is_empty() && missing_styles.is_empty() {
        println!("OK: all expected frames and styles are present");
        return Ok(());
    }
    if !missing_frames.is_empty() {
        eprintln!("missing frames: {}", missing_frames.join(", "));
    }
    if !missing_styles.is_empty() {
        eprintln!("missing styles: {}", missing_styles.join(", "));
    }
    Err("document is missing expected frames or styles".to_string())
}
