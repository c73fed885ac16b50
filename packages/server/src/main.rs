#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entry point for the shark incident dashboard server.
//!
//! Command-line flags take precedence over the `DATA_PATH`, `BIND_ADDR`,
//! and `PORT` environment variables, which take precedence over defaults.

use std::path::PathBuf;

use clap::Parser;
use shark_map_server::{ServerConfig, interactive, run_server};

#[derive(Parser)]
#[command(
    name = "shark_map_server",
    about = "Serve the Australian shark incident dashboard"
)]
struct Cli {
    /// Path to the incident CSV.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Address to bind.
    #[arg(long)]
    bind: Option<String>,

    /// Port to bind.
    #[arg(long)]
    port: Option<u16>,

    /// Prompt for the configuration before starting.
    #[arg(long)]
    interactive: bool,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let env = ServerConfig::from_env();

        ServerConfig {
            data_path: self.data.unwrap_or(env.data_path),
            bind_addr: self.bind.unwrap_or(env.bind_addr),
            port: self.port.unwrap_or(env.port),
        }
    }
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    let interactive = cli.interactive;
    let config = cli.into_config();

    if interactive {
        interactive::run(config).await?;
    } else {
        run_server(config).await?;
    }

    Ok(())
}
