//! # WorkNow API
//!
//! actix-web surface of the newsletter backend: request DTOs, route
//! handlers, domain error mapping and CORS.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::newsletter::AppState;
