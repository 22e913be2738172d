//! Domain model for stored map features.
//!
//! # Responsibility
//! - Define the canonical `Feature` record shared by store and API layers.
//!
//! # Invariants
//! - Every feature is identified by a caller-supplied `FeatureId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod feature;
