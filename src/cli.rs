use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cazcheck")]
#[command(
    version,
    about = "Clean Air Zone charge and MOT history lookup for a vehicle registration"
)]
pub struct Cli {
    /// Registration to look up (otherwise a gateway event is read)
    #[arg(long = "vrn", value_name = "VRN", conflicts_with = "event")]
    pub vrn: Option<String>,

    /// Read the gateway event from a file instead of stdin
    #[arg(long = "event", value_name = "FILE")]
    pub event: Option<PathBuf>,

    /// Use this config file instead of ~/.cazcheck/config.toml
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Derive last_year_mileage from the MOT history
    #[arg(long = "mileage-rate")]
    pub mileage_rate: bool,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize config file
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
