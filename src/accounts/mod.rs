use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub(crate) mod otp;
pub(crate) mod password;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
