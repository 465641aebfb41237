pub mod subscriber;
pub mod verification;

pub use subscriber::{InMemorySubscriberRepository, SubscriberRepository};
pub use verification::{InMemoryVerificationRepository, VerificationRepository};
