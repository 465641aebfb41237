//! Type definitions module
//!
//! - `language` - Newsletter language type
//! - `response` - API response wrappers and health checks

pub mod language;
pub mod response;

pub use language::Language;
pub use response::{ApiResponse, HealthResponse};
