use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mailscrub_core::ReportSource;

#[derive(Parser)]
#[command(name = "mailscrub")]
#[command(about = "Redact personal data from stored emails and publish HTML reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true, env = "MAILSCRUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database, overrides the config file
    #[arg(long, global = true, env = "MAILSCRUB_DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database tables
    Migrate,

    /// Import raw emails from a JSON Lines file
    Import {
        /// One JSON object per line with id, subject, from, to, time, body
        path: PathBuf,
    },

    /// Redact every email into the redacted table
    Redact,

    /// Write paged HTML reports
    Report {
        /// Output directory (default from config: generated)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Table to report on: emails or redacted
        #[arg(long)]
        source: Option<ReportSource>,
    },

    /// Redact, then write reports
    Run,

    /// Redact a single HTML body and print it
    Scrub {
        /// Input file (default: stdin)
        path: Option<PathBuf>,
    },
}
