//! Integration test support
//!
//! Shared helpers for spinning up the API server against a real database
//! and fixtures for building test data.
//!
//! Tests require a running PostgreSQL instance; they skip themselves when
//! `DATABASE_URL` is not set.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
