//! Command-line argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cinedb",
    version,
    about = "Interactive SQL reporting terminal for a cinema database"
)]
pub struct Args {
    /// Database host (overrides config file)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Database port (overrides config file)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Database name (overrides config file)
    #[arg(short = 'd', long)]
    pub dbname: Option<String>,

    /// Database user (overrides config file)
    #[arg(short = 'U', long)]
    pub user: Option<String>,

    /// Database password (overrides config file)
    #[arg(long)]
    pub password: Option<String>,

    /// Run a single report by name and exit instead of entering the menu
    #[arg(short = 'r', long)]
    pub report: Option<String>,

    /// Parameter for --report, repeatable, in declaration order
    #[arg(long = "param", value_name = "VALUE")]
    pub params: Vec<String>,

    /// Path to the configuration file
    #[arg(short = 'c', long, default_value_os_t = cinedb_cli::config::default_config_path())]
    pub config: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
