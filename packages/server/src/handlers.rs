//! HTTP handler functions for the shark map API.

use actix_web::{HttpResponse, web};
use shark_map_dashboard_models::Interaction;
use shark_map_server_models::{ApiError, ApiHealth};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        record_count: state.session.store().len(),
    })
}

/// `GET /api/options`
///
/// Returns the year bounds and option lists for the filter controls.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.options)
}

/// `GET /api/dashboard`
///
/// Returns the latest filter state and rendered views.
pub async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&*state.session.latest())
}

/// `POST /api/interactions`
///
/// Applies one interaction event and returns the newest snapshot. The
/// recomputation runs on the blocking pool so slider drags don't stall
/// the worker.
pub async fn interact(
    state: web::Data<AppState>,
    body: web::Json<Interaction>,
) -> HttpResponse {
    let interaction = body.into_inner();
    log::debug!("Interaction: {interaction:?}");

    match web::block(move || state.session.interact(interaction)).await {
        Ok(snapshot) => HttpResponse::Ok().json(&*snapshot),
        Err(e) => {
            log::error!("Failed to apply interaction: {e}");
            HttpResponse::InternalServerError().json(ApiError {
                error: "Failed to apply interaction".to_string(),
            })
        }
    }
}
