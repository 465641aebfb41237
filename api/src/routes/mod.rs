//! Route handlers grouped by feature

pub mod newsletter;
