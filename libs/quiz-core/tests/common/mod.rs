//! Shared fixtures for quiz-core integration tests.

pub mod fixtures;
