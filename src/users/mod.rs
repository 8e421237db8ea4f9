mod handlers;
mod model;
mod password;
mod routes;

pub use model::*;

use axum::Router;
use uuid::Uuid;

use crate::state::AppState;

pub type UserId = Uuid;

pub fn router(state: AppState) -> Router {
    routes::router(state)
}
