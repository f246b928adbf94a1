//! Request forwarder: keeps the provider credential on the server and
//! exposes `/api/recipes?action=...` to clients.
use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ForwarderConfig, DEFAULT_PORT};
pub use error::ForwardError;
pub use routes::{preflight_handler, recipes_handler, RecipeParams};
pub use state::ForwarderState;

pub const RECIPES_PATH: &str = "/api/recipes";

pub fn router(state: Arc<ForwarderState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(
            RECIPES_PATH,
            get(recipes_handler)
                .post(recipes_handler)
                .options(preflight_handler),
        )
        .layer(cors)
        .with_state(state)
}
