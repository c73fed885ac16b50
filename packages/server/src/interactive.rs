//! Interactive mode for the server.
//!
//! Prompts for the dataset path, bind address, and port before starting.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::{ServerConfig, ServerError};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Each prompt defaults to the matching field of `defaults`. Declining the
/// final confirmation exits without starting.
///
/// # Errors
///
/// Returns a [`ServerError`] if the dataset cannot be loaded or the server
/// fails to start.
#[allow(clippy::future_not_send)]
pub async fn run(defaults: ServerConfig) -> Result<(), ServerError> {
    println!("Shark Incident Dashboard");
    println!();

    let default_path = defaults.data_path.display().to_string();
    let data_path: String = Input::new()
        .with_prompt("Incident CSV")
        .default(default_path.clone())
        .interact_text()
        .unwrap_or(default_path);

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or(defaults.bind_addr);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let config = ServerConfig {
        data_path: PathBuf::from(data_path),
        bind_addr,
        port,
    };

    if !Confirm::new()
        .with_prompt(format!(
            "Serve {} on {}:{}?",
            config.data_path.display(),
            config.bind_addr,
            config.port
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
