//! MySQL repository implementations

mod subscriber_repository_impl;
mod verification_repository_impl;

pub use subscriber_repository_impl::MySqlSubscriberRepository;
pub use verification_repository_impl::MySqlVerificationRepository;
