use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// HTTP error catalog service
#[derive(Debug, Parser)]
#[command(name = "httperr", about = "Serve and render structured HTTP error documents")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "httperr.toml", env = "HTTPERR_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "HTTPERR_LISTEN")]
    pub listen: Option<SocketAddr>,
}
