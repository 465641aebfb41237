//! Newsletter subscriber registry module.

mod r#trait;
pub use r#trait::SubscriberRepository;

mod memory;
pub use memory::InMemorySubscriberRepository;

#[cfg(test)]
mod tests;
