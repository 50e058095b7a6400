use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::auth::{auth_middleware, csrf_middleware};
use crate::handlers::{auth as auth_handlers, settings as settings_handlers};
use crate::store::UserStore;
use crate::Config;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> Self {
        Self { store, config }
    }
}

pub fn create_router(state: AppState) -> Router {
    // Settings routes. Layers run outermost-last, so the CSRF check happens
    // before authentication and a cross-site request is rejected even when
    // it carries a valid session.
    let settings_routes = Router::new()
        .route("/update-my-profileui", put(settings_handlers::update_profile_ui))
        .route("/update-my-theme", put(settings_handlers::update_theme))
        .route("/update-my-socials", put(settings_handlers::update_socials))
        .route("/update-my-username", put(settings_handlers::update_username))
        .route(
            "/update-my-keyboard-shortcuts",
            put(settings_handlers::update_keyboard_shortcuts),
        )
        .route("/update-my-quincy-email", put(settings_handlers::update_quincy_email))
        .route("/update-my-honesty", put(settings_handlers::update_honesty))
        .route("/update-privacy-terms", put(settings_handlers::update_privacy_terms))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .route_layer(middleware::from_fn(csrf_middleware));

    let auth_routes = Router::new().route("/dev-callback", get(auth_handlers::dev_callback));

    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes)
        .merge(settings_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
