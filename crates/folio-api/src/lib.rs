pub mod admin;
pub mod contact;
pub mod error;
pub mod middleware;
pub mod state;
pub mod stats;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

pub use error::ApiError;
pub use state::{AppState, AppStateInner};

/// All routes the site calls. Admin routes sit behind the bearer-token check.
pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/admin/credentials",
            get(admin::get_credentials).put(admin::save_credentials),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    Router::new()
        .route("/stats", get(stats::get_stats))
        .route("/stats/views", post(stats::record_view))
        .route("/stats/like", post(stats::toggle_like))
        .route("/contact", post(contact::send_message))
        .route("/contact/status", get(contact::status))
        .merge(admin_routes)
        .with_state(state)
}
