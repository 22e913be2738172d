//! Core domain logic for the feature map store.
//! This crate is the single source of truth for feature invariants.

pub mod context;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use context::{StoreContext, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, log_value, logging_status};
pub use model::feature::{Coordinates, Feature, FeatureId, FeatureValidationError};
pub use repo::feature_repo::{FeatureRepository, RepoError, RepoResult, SqliteFeatureRepository};
pub use service::feature_service::{FeatureService, MutationOutcome};

/// Constant liveness reply served by the `hello` query.
pub fn hello() -> &'static str {
    "hello"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
