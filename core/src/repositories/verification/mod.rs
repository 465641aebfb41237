//! Pending verification record repository module.

mod r#trait;
pub use r#trait::VerificationRepository;

mod memory;
pub use memory::InMemoryVerificationRepository;
