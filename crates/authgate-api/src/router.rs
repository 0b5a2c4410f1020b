//! Route definitions for the Authgate HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::http::{HeaderValue, Method, header};
use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .merge(user_routes(&state))
        .merge(tenant_routes(&state))
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, logout, self.
///
/// Refresh and logout sit behind the refresh middleware (signature +
/// revocation check); self sits behind the access middleware.
fn auth_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    let refresh_guarded = Router::new()
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::refresh::validate_refresh,
        ));

    let access_guarded = Router::new()
        .route("/auth/self", get(handlers::auth::whoami))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    public.merge(refresh_guarded).merge(access_guarded)
}

/// User management endpoints, admin or manager only.
fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::create_user))
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", patch(handlers::user::update_user))
        .route("/users/{id}", delete(handlers::user::delete_user))
        // Layers run outermost-last: authenticate first, then the guard.
        .route_layer(axum_middleware::from_fn(middleware::rbac::require_manager))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ))
}

/// Tenant management endpoints, admin only.
fn tenant_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/tenants", post(handlers::tenant::create_tenant))
        .route("/tenants", get(handlers::tenant::list_tenants))
        .route("/tenants/{id}", get(handlers::tenant::get_tenant))
        .route("/tenants/{id}", patch(handlers::tenant::update_tenant))
        .route("/tenants/{id}", delete(handlers::tenant::delete_tenant))
        .route_layer(axum_middleware::from_fn(middleware::rbac::require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ))
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configured origins.
///
/// Credentials (cookies) are always allowed, which rules out a wildcard
/// origin.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
