use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cancelkit")]
#[command(bin_name = "cancelkit")]
#[command(version)]
#[command(about = "Purchase removal flow: survey gating, removal and cascade")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[arg(long, global = true, help = "Log flow decisions to stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Show the resolved configuration")]
    Config,
    #[command(about = "Compute the survey length for a purchase")]
    Gate(GateArgs),
    #[command(about = "Run a removal scenario against in-memory collaborators")]
    Walk(WalkArgs),
}

#[derive(Debug, Args)]
pub struct GateArgs {
    #[arg(long, help = "Purchase is on the business tier")]
    pub business: bool,
    #[arg(long, help = "Answer to the first survey question")]
    pub first_answer: Option<String>,
    #[arg(long, help = "Concierge experiment variant")]
    pub variant: Option<String>,
}

#[derive(Debug, Args)]
pub struct WalkArgs {
    #[arg(help = "Scenario TOML file")]
    pub scenario: PathBuf,
}
