//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the GraphQL/HTTP layer decoupled from storage details.

pub mod feature_service;
