//! Park Scout library
//!
//! This crate exposes the retrieval, cache, and session modules for use by
//! the binary and the integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod fetch;
pub mod session;
pub mod ui;
