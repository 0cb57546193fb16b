use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "histerrs-runner",
    about = "Replay message history fixtures through the error extractor"
)]
pub struct Cli {
    #[arg(default_value = "fixtures/histerrs")]
    pub path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}
