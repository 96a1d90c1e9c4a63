//! # Meridian: Client for the Meridian Edge Delivery Platform
//!
//! This crate implements `merictl`, a command-line client for the Meridian
//! edge delivery platform's management API. Every command follows the same
//! shape: validate flags, resolve the service identity, (for mutating
//! commands) resolve an editable service version, call exactly one remote
//! operation, and render the result as text.
//!
//! ## Core Concepts
//!
//! ### Services
//! A service is a deployable configuration unit on the platform, identified
//! by an opaque service ID. Commands resolve the ID from the `--service-id`
//! flag, the `MERIDIAN_SERVICE_ID` environment variable, or the
//! `meridian.toml` manifest, in that order.
//!
//! ### Versions
//! A service's configuration is versioned. A version becomes locked once it
//! is activated; locked versions are immutable snapshots. Mutating commands
//! taking `--autoclone` transparently clone a locked target version into a
//! new editable version before applying changes.
//!
//! ### Entities
//! Configuration objects scoped to a service (and, for most, to a version):
//! Kafka logging endpoints, edge dictionary items, and so on. Each entity
//! verb maps to exactly one remote API operation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Command Handlers (src/commands/)        │
//! ├─────────────────────────────────────────┤
//! │ Identity / Version Resolution           │
//! │ (manifest.rs, version.rs)               │
//! ├─────────────────────────────────────────┤
//! │ Typed Operations (kafka.rs, ...)        │
//! ├─────────────────────────────────────────┤
//! │ HTTP Client (http_utils.rs)             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Invocations are single-threaded and linear: no retries, no concurrency,
//! no state shared across runs. Errors are terminal and surface the remote
//! message verbatim.
//!
//! ## Resolving a service identity
//!
//! ```rust
//! use meridian::manifest::{Manifest, ServiceIdSource, resolve_service_id};
//!
//! let manifest = Manifest::default();
//! let (id, source) = resolve_service_id(Some("123"), None, &manifest);
//! assert_eq!(id.as_deref(), Some("123"));
//! assert_eq!(source, ServiceIdSource::Flag);
//! ```

pub mod cli_utils;
pub mod commands;
pub mod dictionary;
pub mod errors;
pub mod http_utils;
pub mod kafka;
pub mod manifest;
pub mod stats;
pub mod text;
pub mod version;

pub use dictionary::{DictionaryItem, DictionaryItemInput};
pub use errors::Error;
pub use http_utils::ApiClient;
pub use kafka::{CreateKafkaInput, Kafka, UpdateKafkaInput};
pub use manifest::{Manifest, ServiceIdSource};
pub use stats::RegionsResponse;
pub use version::{Version, VersionSelector};
