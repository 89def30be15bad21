// Command-line arguments for the silva binary

use clap::Parser;
use std::path::PathBuf;

/// Silva - a Granblue Fantasy chat bot
#[derive(Parser, Debug)]
#[command(name = "silva")]
#[command(author, version, about = "Silva - serves chat commands on stdin", long_about = None)]
pub struct Args {
    /// Settings file (JSON); defaults to <config_dir>/silva/settings.json
    pub settings: Option<PathBuf>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}
