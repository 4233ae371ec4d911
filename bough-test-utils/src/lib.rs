//! Test utilities shared across the bough workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`], [`EnvTestGuard`])
//! - Temporary git repositories ([`GitRepoTestGuard`])
//! - Provider-shaped branch payloads ([`payloads`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod git;
pub mod payloads;

// Re-export commonly used items
pub use env::{EnvTestGuard, EnvVarGuard};
pub use git::{GitRepoTestGuard, set_origin};
