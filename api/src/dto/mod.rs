//! Request and response bodies. All JSON keys are camelCase.

pub mod newsletter;

pub use newsletter::*;
