//! # Routes
//!
//! | Method | Path              | Handler      |
//! |--------|-------------------|--------------|
//! | GET    | `/api/health`     | `health`     |
//! | POST   | `/api/regenerate` | `regenerate` |
//! | GET    | anything else     | `paths.web_root` files |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use deck_render::Session;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{parse_json, ApiError, ApiResponse, Health, RegenerateRequest, Regenerated};

/// Shared handler state. Holding the session lock serializes regenerations.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub web_root: PathBuf,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let web_root = PathBuf::from(&session.config().paths.web_root);
        Self {
            session: Arc::new(Mutex::new(session)),
            web_root,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let viewer = ServeDir::new(&state.web_root);
    Router::new()
        .route("/api/health", get(health))
        .route("/api/regenerate", post(regenerate))
        .fallback_service(viewer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `0.0.0.0:port` and serves until the process ends.
pub async fn run_server(session: Session, port: u16) -> std::io::Result<()> {
    let state = AppState::new(session);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, web_root = %state.web_root.display(), "viewer server listening");
    axum::serve(listener, router(state)).await
}

async fn health() -> Json<ApiResponse<Health>> {
    Json(ApiResponse::ok(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

async fn regenerate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<Regenerated>>, ApiError> {
    let request: RegenerateRequest = parse_json(&body)?;
    let session = Arc::clone(&state.session).lock_owned().await;

    let regenerated = tokio::task::spawn_blocking(move || regenerate_blocking(session, request))
        .await
        .map_err(|err| ApiError::internal(format!("regeneration task failed: {err}")))??;
    Ok(Json(ApiResponse::ok(regenerated)))
}

/// Applies the overrides (all or none) and exports. A failed export puts the
/// configuration back as it was before the request. The file on disk is left
/// untouched while unsaved overrides exist.
fn regenerate_blocking(
    mut session: OwnedMutexGuard<Session>,
    request: RegenerateRequest,
) -> Result<Regenerated, ApiError> {
    let RegenerateRequest { parameters, format } = request;
    parameters.applied(session.config())?;
    let previous = session.store().clone();
    session.apply(&parameters)?;

    let report = match session.export(format) {
        Ok(report) => report,
        Err(err) => {
            *session.store_mut() = previous;
            return Err(err.into());
        }
    };
    info!(
        parameters = parameters.len(),
        partial = report.is_partial(),
        "regenerated"
    );
    Ok(Regenerated { parameters, report })
}
