//! # TempShare - Ephemeral File Sharing
//!
//! A small service that turns an uploaded file into a time-limited public
//! URL. Files are kept for a fixed retention window and then removed by a
//! background sweeper, built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Core business logic (entities, value objects, domain errors)
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: Adapters for storage and persistence
//! - **API**: HTTP handlers and routing
//!
//! ## Key Features
//!
//! - Streaming uploads and downloads, bounded memory per request
//! - Collision-free storage keys derived from a UUID and a sanitized name
//! - Crash-safe JSON ledger with atomic rewrites
//! - Background retention sweeper with a fixed expiry window

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
