//! Thumbgate - a thumbnail retrieval gateway.
//!
//! This crate resolves page URLs to thumbnail images over one of two backing
//! stores, tracking in-flight asynchronous lookups and answering every
//! request exactly once: with the real thumbnail, with a shared default
//! image, or with an explicit absent response when no backend exists.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the gateway and its services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for configuration, resources,
/// and the backing stores.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "thumbgate";
