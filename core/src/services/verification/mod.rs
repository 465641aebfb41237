//! Verification service module for email-based newsletter confirmation
//!
//! This module provides the verification code workflow:
//! - Code generation, storage and email dispatch
//! - Code confirmation with expiry and attempt tracking
//! - Subscriber registration on successful confirmation

mod config;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::EmailServiceTrait;
pub use types::{ConfirmCodeResult, RequestCodeResult, VerificationEmail};
