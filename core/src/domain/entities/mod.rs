//! Domain entities representing core business objects.

pub mod subscriber;
pub mod verification_code;

// Re-export commonly used types
pub use subscriber::{NewsletterFrequency, Subscriber, SubscriberProfile, SubscriptionPreferences};
pub use verification_code::{
    VerificationRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};
