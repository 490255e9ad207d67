use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::DocumentStore;
use crate::error::ApiError;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{require_admin, require_auth};
use crate::services::{CatalogService, RelationshipService, UserService};

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn DocumentStore>) -> Self {
        Self { config, store }
    }

    pub fn users(&self) -> UserService {
        UserService::new(Arc::clone(&self.store), self.config.security.clone())
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.store))
    }

    pub fn relationships(&self) -> RelationshipService {
        RelationshipService::new(Arc::clone(&self.store))
    }
}

/// Build the full router: public, token-protected and admin tiers merged
/// under one state, plus the global layers the configuration asks for.
pub fn app(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .merge(elevated_routes(state.clone()))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home::home))
        .route("/health", get(public::home::health))
        .route("/api/users", post(public::users::register))
        .route("/api/auth", post(public::users::login))
        .route("/api/malls", get(public::malls::list))
        .route("/api/malls/:id", get(public::malls::show))
        .route("/api/malls/:id/stores", get(public::malls::stores))
        .route("/api/malls/:id/employees", get(public::malls::employees))
        .route("/api/malls/:id/:sub_id", get(public::malls::employee))
        .route("/api/stores", get(public::stores::list))
        .route("/api/stores/:id", get(public::stores::show))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(protected::users::me))
        .route("/api/malls", post(protected::malls::create))
        .route("/api/malls/:id", put(protected::malls::update))
        .route("/api/malls/:id/:sub_id", post(protected::malls::add_store).put(protected::employees::update))
        .route("/api/malls/:id/:sub_id/employees", post(protected::employees::create))
        .route("/api/stores", post(protected::stores::create))
        .route("/api/stores/:id", put(protected::stores::update))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

fn elevated_routes(state: AppState) -> Router<AppState> {
    // route_layer wraps inside-out: the token gate runs first
    Router::new()
        .route("/api/malls/:id", delete(elevated::malls::delete))
        .route("/api/malls/:id/:sub_id", delete(elevated::malls::delete_employee))
        .route("/api/stores/:id", delete(elevated::stores::delete))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Can not find {}", uri))
}
