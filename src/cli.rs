//! Command-line interface for the restructurer.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use crate::config::{GrammarConfig, StyleConfig};
use crate::document::{load_document, save_document};
use crate::error::{RestructureError, Result};
use crate::preview::{self, PreviewProjection};
use crate::report::save_report;
use crate::restructurer::{restructure_confirmed, ConfirmationChannel};
use crate::structure::analyze_structure;
use crate::types::{RestructureOptions, Severity, StructureAnalysis};

/// Skripsi restructurer - Analyze and repair the chapter structure of thesis documents.
#[derive(Parser)]
#[command(name = "skripsi-restructurer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze chapter structure and report violations.
    Analyze {
        /// Path to the document snapshot (JSON)
        document: PathBuf,

        /// Write a YAML report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Grammar/style configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the before/after chapter order without changing anything.
    Preview {
        /// Path to the document snapshot (JSON)
        document: PathBuf,

        /// Grammar/style configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Rebuild the document with chapters in canonical order.
    Restructure {
        /// Path to the document snapshot (JSON)
        document: PathBuf,

        /// Output path (default: <name>_restructured.json next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Apply without asking for confirmation
        #[arg(long)]
        yes: bool,

        /// Grammar/style configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Grammar and style configuration as loaded from a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    grammar: GrammarConfig,
    styles: StyleConfig,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            document,
            report,
            config,
        } => analyze_command(&document, report.as_deref(), config.as_deref()),
        Commands::Preview { document, config } => preview_command(&document, config.as_deref()),
        Commands::Restructure {
            document,
            output,
            yes,
            config,
        } => restructure_command(&document, output.as_deref(), yes, config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| RestructureError::Storage {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(serde_json::from_reader(BufReader::new(file))?)
        }
        None => Ok(FileConfig::default()),
    }
}

fn print_violations(analysis: &StructureAnalysis) {
    if analysis.violations.is_empty() {
        println!("  {}", style("No structural violations found").green());
        return;
    }

    for violation in &analysis.violations {
        let tag = match violation.severity {
            Severity::Error => style("error").red().bold(),
            Severity::Warning => style("warning").yellow().bold(),
        };
        println!("  {tag}: {}", violation.message);
    }
}

/// Execute the analyze command.
fn analyze_command(
    document: &Path,
    report: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let cfg = load_config(config)?;
    let blocks = load_document(document)?;
    let analysis = analyze_structure(&blocks, &cfg.grammar)?;

    println!(
        "{} {}",
        style("Analyzed").bold(),
        style(document.display()).cyan()
    );
    println!("  Blocks: {}", blocks.len());
    println!("  Chapters: {}", analysis.chapters_by_position.len());
    for chapter in &analysis.chapters_by_position {
        let subsections = if chapter.subsections.is_empty() {
            String::new()
        } else {
            format!(" ({} subsections)", chapter.subsections.len())
        };
        println!(
            "    {} {}  {}{subsections}",
            cfg.grammar.heading_keyword,
            chapter.roman_numeral,
            chapter.title
        );
    }
    println!();
    print_violations(&analysis);

    if analysis.reordering_needed {
        println!(
            "  {}",
            style("Run 'restructure' to rebuild the document in canonical order").yellow()
        );
    }

    if let Some(report_path) = report {
        save_report(&analysis, blocks.len(), report_path)?;
        println!();
        println!(
            "{} {}",
            style("Report saved to:").green().bold(),
            report_path.display()
        );
    }

    Ok(())
}

/// Execute the preview command.
fn preview_command(document: &Path, config: Option<&Path>) -> Result<()> {
    let cfg = load_config(config)?;
    let blocks = load_document(document)?;
    let projection = preview::preview(&blocks, &cfg.grammar)?;
    print!("{}", preview::render(&projection));
    Ok(())
}

/// Confirmation channel backed by an interactive terminal prompt.
struct TerminalConfirmation {
    term: Term,
}

impl ConfirmationChannel for TerminalConfirmation {
    fn confirm(&mut self, projection: &PreviewProjection) -> bool {
        print!("{}", preview::render(projection));
        if self
            .term
            .write_str("Apply this restructuring? [y/N] ")
            .is_err()
        {
            return false;
        }
        match self.term.read_line() {
            Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Execute the restructure command.
fn restructure_command(
    document: &Path,
    output: Option<&Path>,
    yes: bool,
    config: Option<&Path>,
) -> Result<()> {
    let cfg = load_config(config)?;
    let blocks = load_document(document)?;

    println!(
        "{} {}",
        style("Restructuring").bold(),
        style(document.display()).cyan()
    );
    println!();

    let options = RestructureOptions {
        reorder_chapters: true,
        assume_confirmed: yes,
    };
    let mut channel = TerminalConfirmation {
        term: Term::stdout(),
    };
    let result = restructure_confirmed(&blocks, &cfg.grammar, &cfg.styles, &options, &mut channel)?;

    if !result.success {
        println!("{}", style(&result.message).yellow());
        return Ok(());
    }

    if result.changes_applied.is_empty() {
        println!("{}", style(&result.message).green());
        return Ok(());
    }

    // Create progress spinner for the save step
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Saving restructured document...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(document));

    let saved = save_document(&result.new_blocks, &output_path);
    pb.finish_and_clear();
    saved?;

    println!("{}", style(&result.message).green());
    for change in &result.changes_applied {
        println!("  - {change}");
    }
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Default output path: `<name>_restructured.json` next to the input.
fn default_output_path(document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    document.with_file_name(format!("{stem}_restructured.json"))
}
