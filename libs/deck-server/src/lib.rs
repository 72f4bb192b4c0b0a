//! # Deck Server
//!
//! Serves the web viewer's static files and a regenerate endpoint that
//! applies parameter overrides to the shared session and exports a fresh
//! mesh.
//!
//! ## Example
//!
//! ```rust,no_run
//! use deck_render::Session;
//!
//! # async fn serve() -> std::io::Result<()> {
//! let session = Session::open("config.yaml").unwrap();
//! deck_server::run_server(session, 8080).await
//! # }
//! ```

pub mod api;
pub mod routes;

pub use api::{ApiError, ApiResponse, Health, RegenerateRequest, Regenerated};
pub use routes::{router, run_server, AppState};
