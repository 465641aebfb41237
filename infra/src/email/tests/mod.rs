//! Unit tests for email module

pub mod adapter_tests;
