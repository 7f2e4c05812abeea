use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, MAX_POLLING_INTERVAL};

pub const DEFAULT_POLLING_INTERVAL: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "fixture-watch")]
#[command(about = "Poll the Premier League website for new fixture news", long_about = None)]
pub struct Cli {
    /// Send email notifications (EMAIL_ADDRESS and EMAIL_PASSWORD must be set, e.g. in .env)
    #[arg(short = 'e', long)]
    pub send_email: bool,

    /// Interval in minutes between polls
    #[arg(
        short = 'p',
        long,
        default_value_t = DEFAULT_POLLING_INTERVAL,
        value_parser = clap::value_parser!(u64).range(1..=MAX_POLLING_INTERVAL)
    )]
    pub polling_interval: u64,

    /// Settings file (default: ~/.config/fixture-watch/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Append log lines to this file instead of stdout
    #[arg(short, long)]
    pub log: Option<PathBuf>,
}

impl Cli {
    pub fn to_config(&self) -> Config {
        Config::from_minutes(self.polling_interval, self.send_email)
    }
}
