//! Direct subscription management: subscribe without a code, unsubscribe,
//! and subscription lookup.

mod service;


pub use service::{NewsletterService, SubscriptionStatus};
