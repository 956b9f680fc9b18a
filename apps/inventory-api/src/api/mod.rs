//! API routes module
//!
//! This module wires the item domain routes into the application router.

pub mod health;
pub mod items;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Creates the API routes.
///
/// This function takes a reference to AppState and initializes all services.
/// Returns a stateless Router (all sub-routers have state already applied).
/// Only Arc pointer clones remain when domains extract db connections (cheap).
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/items", items::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`. The /ready endpoint pings the database connection.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
