use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use na_core::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod accounts;
pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use auth::{AuthUser, TokenService};
pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiPath};
pub use state::AppState;

pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// CORS for a fixed list of browser origins, with credentials allowed.
pub fn cors_layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.as_ref().trim())
                .map_err(|_| Error::Config(format!("Invalid CORS origin '{}'", origin.as_ref())))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/news", get(handlers::list_news).post(handlers::create_news))
        .route(
            "/news/:id",
            get(handlers::get_news)
                .put(handlers::update_news)
                .delete(handlers::delete_news),
        )
        .route("/news/:id/view", post(handlers::view_news))
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/me", get(accounts::me))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

pub mod prelude {
    pub use crate::{create_app, cors_layer, serve, AppState, TokenService};
    pub use na_core::{Article, Error, Result};
}
