#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the shark incident dashboard.
//!
//! Loads the incident CSV once at startup into an immutable record store,
//! then serves the filter-control options and accepts interaction events,
//! answering each with freshly rendered chart descriptions. A single shared
//! dashboard session is kept per process. A built front end is served from
//! `app/dist` when that directory exists.

mod handlers;
pub mod interactive;

use std::path::{Path, PathBuf};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use shark_map_dashboard::session::DashboardSession;
use shark_map_incident_models::FilterField;
use shark_map_server_models::ApiFilterOptions;
use shark_map_store::{RecordStore, StoreError};
use thiserror::Error;

/// Dataset loaded when neither `--data` nor `DATA_PATH` is given.
pub const DEFAULT_DATA_PATH: &str = "data/shark_incidents.csv";
/// Address bound when neither `--bind` nor `BIND_ADDR` is given.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Port bound when neither `--port` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 8053;

const STATIC_DIR: &str = "app/dist";

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The incident dataset could not be loaded.
    #[error("Failed to load incident data: {0}")]
    Store(#[from] StoreError),

    /// Binding or running the HTTP server failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Path of the incident CSV.
    pub data_path: PathBuf,
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `DATA_PATH`, `BIND_ADDR`, and `PORT` from the environment,
    /// falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Unparseable ports
    /// fall back to [`DEFAULT_PORT`].
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            data_path: lookup("DATA_PATH").map_or(defaults.data_path, PathBuf::from),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// The dashboard session every request reads and updates.
    pub session: DashboardSession,
    /// Filter-control options, computed once from the store.
    pub options: ApiFilterOptions,
}

impl AppState {
    /// Wraps a loaded store in a fresh dashboard session.
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        let (year_min, year_max) = store.year_bounds();
        let options = ApiFilterOptions {
            year_min,
            year_max,
            provocation: store.distinct(FilterField::Provocation),
            species: store.distinct(FilterField::Species),
            activity: store.distinct(FilterField::Activity),
        };

        Self {
            session: DashboardSession::new(store.into()),
            options,
        }
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/options", web::get().to(handlers::options))
            .route("/dashboard", web::get().to(handlers::dashboard))
            .route("/interactions", web::post().to(handlers::interact)),
    );
}

/// Loads the dataset and starts the HTTP server.
///
/// This is a regular async function; the caller provides the runtime (e.g.
/// via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError::Store`] if the dataset cannot be loaded, so no
/// dashboard is ever served from partial data, and [`ServerError::Io`] if
/// the server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store = RecordStore::from_path(&config.data_path)?;
    let state = web::Data::new(AppState::new(store));

    let serve_static = Path::new(STATIC_DIR).is_dir();
    if !serve_static {
        log::info!("No front end found at {STATIC_DIR}, serving the API only");
    }

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let app = App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api);

        if serve_static {
            app.service(Files::new("/", STATIC_DIR).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_without_env() {
        assert_eq!(ServerConfig::from_lookup(|_| None), ServerConfig::default());
    }

    #[test]
    fn config_reads_lookup_values() {
        let config = ServerConfig::from_lookup(|key| match key {
            "DATA_PATH" => Some("/srv/incidents.csv".to_string()),
            "BIND_ADDR" => Some("0.0.0.0".to_string()),
            "PORT" => Some("9000".to_string()),
            _ => None,
        });

        assert_eq!(config.data_path, PathBuf::from("/srv/incidents.csv"));
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn config_ignores_bad_port() {
        let config = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
