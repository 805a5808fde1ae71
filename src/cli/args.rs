//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan resource files and print the translatable records
//! - `init`: Write a default `.locscanrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that read a project.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root to scan; the config file is searched from here upwards
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Markup attribute marking translatable/excluded nodes (overrides config file)
    #[arg(long)]
    pub scope_attribute: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings from resource files
    Extract(ExtractCommand),
    /// Initialize a new .locscanrc.json configuration file
    Init,
}
