use clap::{Parser, Subcommand};
use oxidized_registry::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "oxidized-registry",
    version,
    about = "Validate a registry of contributor profiles, modules, and templates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the registry layout and every README in it
    Validate {
        /// Registry root directory (overrides `registry.root`)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Shared icons directory (overrides `registry.icons_dir`)
        #[arg(long)]
        icons_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Worker threads for per-file work (overrides `validation.jobs`)
        #[arg(long, short)]
        jobs: Option<usize>,

        /// Only log warnings and errors
        #[arg(long, short)]
        quiet: bool,
    },

    /// List all validation rules with descriptions
    ListRules,

    /// Show full explanation for a rule
    Explain {
        /// Rule ID (e.g., "body/skipped-heading-level")
        rule_id: String,
    },
}
