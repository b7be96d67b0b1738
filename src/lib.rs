//! randomedia - random movies, TV shows, and artists from public media APIs
//!
//! This library crate exposes the service and router for integration testing.

pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod projection;
pub mod server;
pub mod service;
pub mod upstream;
