//! Feature use-case service.
//!
//! # Responsibility
//! - Provide add/edit/delete/list entry points for the API layer.
//! - Translate repository `NotFound` on edit/delete into an explicit outcome.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.
//! - A missing edit/delete target is never an error at this layer; callers
//!   decide how to surface `MutationOutcome::NoMatch`.

use crate::logging::log_value;
use crate::model::feature::{Feature, FeatureId};
use crate::repo::feature_repo::{FeatureRepository, RepoError, RepoResult};
use log::{info, warn};

/// Result of an edit or delete that targets one feature by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A stored feature matched and was changed.
    Applied,
    /// No stored feature had the requested id; nothing changed.
    NoMatch,
}

/// Use-case service wrapper for feature CRUD operations.
pub struct FeatureService<R: FeatureRepository> {
    repo: R,
}

impl<R: FeatureRepository> FeatureService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new feature under its caller-supplied id.
    ///
    /// Returns `RepoError::DuplicateId` when the id is taken.
    pub fn add_feature(&self, feature: &Feature) -> RepoResult<FeatureId> {
        let id = self.repo.create_feature(feature)?;
        info!(
            "event=feature_add module=service status=ok feature_id={}",
            log_value(&id)
        );
        Ok(id)
    }

    /// Replaces all mutable fields of the feature with `feature.id`.
    pub fn edit_feature(&self, feature: &Feature) -> RepoResult<MutationOutcome> {
        let outcome = no_match_as_outcome(self.repo.replace_feature(feature))?;
        log_outcome("feature_edit", &feature.id, outcome);
        Ok(outcome)
    }

    /// Removes the feature with `id`.
    pub fn delete_feature(&self, id: &str) -> RepoResult<MutationOutcome> {
        let outcome = no_match_as_outcome(self.repo.delete_feature(id))?;
        log_outcome("feature_delete", id, outcome);
        Ok(outcome)
    }

    /// Lists every stored feature in insertion order.
    pub fn all_features(&self) -> RepoResult<Vec<Feature>> {
        let features = self.repo.list_features()?;
        info!(
            "event=feature_list module=service status=ok count={}",
            features.len()
        );
        Ok(features)
    }
}

fn no_match_as_outcome(result: RepoResult<()>) -> RepoResult<MutationOutcome> {
    match result {
        Ok(()) => Ok(MutationOutcome::Applied),
        Err(RepoError::NotFound(_)) => Ok(MutationOutcome::NoMatch),
        Err(err) => Err(err),
    }
}

fn log_outcome(event: &str, id: &str, outcome: MutationOutcome) {
    match outcome {
        MutationOutcome::Applied => {
            info!(
                "event={event} module=service status=ok feature_id={}",
                log_value(id)
            );
        }
        MutationOutcome::NoMatch => {
            warn!(
                "event={event} module=service status=not_found feature_id={}",
                log_value(id)
            );
        }
    }
}
