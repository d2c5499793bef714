pub mod format;
pub mod toml_config;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wpcs-fix", about = "Auto-fix WordPress coding standards violations in PHP source trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply the configured rewrite rules to files in place
    Fix {
        /// Paths to fix (files or directories); defaults to the config's include dirs
        paths: Vec<PathBuf>,

        /// Path to wpcs-fix.toml config file
        #[arg(short, long, default_value = "wpcs-fix.toml")]
        config: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        /// Report what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate a starter wpcs-fix.toml for your project
    Init {
        /// Output file path for the generated config
        #[arg(short, long, default_value = "wpcs-fix.toml")]
        output: PathBuf,

        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Compact,
}
