pub mod handlers;
pub mod requests;
pub mod responses;
pub mod service;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/person", post(handlers::create_person))
        .route("/person/{id}", put(handlers::update_person))
        .route("/person/{id}", delete(handlers::delete_person))
        .route("/persons", get(handlers::list_persons))
}
