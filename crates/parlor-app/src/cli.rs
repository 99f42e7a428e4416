use std::path::PathBuf;

use clap::Parser;

/// Parlor: a console chat client for Azure OpenAI deployments.
#[derive(Parser, Debug)]
#[command(name = "parlor", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory for transcript files, overriding the config.
    #[arg(long)]
    pub transcript_dir: Option<PathBuf>,

    /// Load the latest session snapshot before the first prompt.
    #[arg(long)]
    pub resume: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
