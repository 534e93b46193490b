use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smash", version, about = "Small Shell: an interactive shell with job control")]
pub struct Cli {
    /// Initial prompt text
    #[arg(long)]
    pub prompt: Option<String>,

    /// Config file (defaults to ~/.smash.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run a single command line and exit
    #[arg(short = 'c', value_name = "LINE")]
    pub command: Option<String>,
}
