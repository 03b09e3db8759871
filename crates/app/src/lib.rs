//! Wiring for the storefront demo: configuration and a scripted shopping
//! session over the in-memory catalog and order backend.

pub mod config;
pub mod demo;

pub use config::StorefrontConfig;
