//! Cross-cutting HTTP handlers: error mapping and health check.

pub mod error;
pub mod health;

pub use error::{
    domain_error_response, json_error_handler, query_error_handler, validation_error_response,
};
pub use health::health_check;
