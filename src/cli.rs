//! CLI interface for the skill gap analyzer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-gap-analyzer")]
#[command(about = "Semantic skill gap analysis and learning path engine")]
#[command(
    long_about = "Match candidate skills against a job's requirement profile using semantic embeddings and fuzzy matching, classify the gaps, and produce a time-estimated learning path"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze skill gaps against a target job
    Analyze {
        /// Candidate skills, comma separated (e.g. "Python, SQL, pandas")
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,

        /// Read candidate skills from a plain-text file, one per line
        #[arg(long)]
        skills_file: Option<PathBuf>,

        /// Target job profession
        #[arg(short, long)]
        job: String,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Show full skill lists and per-match details
        #[arg(short, long)]
        detailed: bool,

        /// Skip semantic matching; no embedding model is loaded
        #[arg(long)]
        lexical_only: bool,
    },

    /// Extract candidate skills from a plain-text document
    Extract {
        /// Path to a plain-text file
        #[arg(short, long)]
        file: PathBuf,

        /// Emit the extracted spans as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// List job professions known to the requirement table
    Jobs,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}
