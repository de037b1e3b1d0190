pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::database::user_store::UserStore;
use crate::services::user_service::UserService;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let store = if config.seed_users {
            UserStore::seeded()
        } else {
            UserStore::new()
        };
        Self::with_store(store, config.default_per_page)
    }

    pub fn with_store(store: UserStore, default_per_page: usize) -> Self {
        Self {
            user_service: UserService::new(store, default_per_page),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
