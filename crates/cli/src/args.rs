//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// farm-assistant: ask questions about farrowing, mortality, feed and weight on your pig farm
#[derive(Parser, Debug)]
#[command(name = "farm-assistant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat with the farm assistant
    Chat(ChatArgs),

    /// Answer a single question
    Ask(AskArgs),

    /// Classify a question and show the matching farm data (no LLM call)
    Classify(ClassifyArgs),

    /// Show the farm overview dashboard
    Status(StatusArgs),

    /// List example questions
    Examples,

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Append every turn to this JSONL file
    #[arg(long)]
    pub transcript: Option<PathBuf>,
}

/// Where a one-shot question comes from
#[derive(Args, Debug)]
pub struct QuestionInput {
    /// Question text
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File containing the question (use - for stdin)
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub input: QuestionInput,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub input: QuestionInput,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
