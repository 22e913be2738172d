//! Mutation root.
//!
//! Mutations answer with a fixed status string, never the affected feature.

use async_graphql::{Context, Object, Result, ID};
use featuremap_core::{log_value, Coordinates, Feature, MutationOutcome};
use log::info;

use super::error::{not_found_error, validation_error};
use super::{run_store, MissingTargetPolicy};

pub const FEATURE_ADDED: &str = "feature added";
pub const FEATURE_EDITED: &str = "feature edited";
pub const FEATURE_DELETED: &str = "feature deleted";

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Store a new feature under the caller-supplied id.
    async fn add_feature(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: String,
        #[graphql(name = "type")] kind: Option<String>,
        geometry_type: String,
        coordinates: Coordinates,
    ) -> Result<Option<String>> {
        let feature = FeatureArgs {
            id,
            title,
            kind,
            geometry_type,
            coordinates,
        }
        .into_feature()?;
        info!(
            "event=graphql_mutation module=graphql op=addFeature feature_id={}",
            log_value(&feature.id)
        );

        run_store(ctx, move |service| service.add_feature(&feature)).await?;
        Ok(Some(FEATURE_ADDED.to_string()))
    }

    /// Replace every field of the feature with `id`. An omitted `type` is cleared.
    async fn edit_feature(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: String,
        #[graphql(name = "type")] kind: Option<String>,
        geometry_type: String,
        coordinates: Coordinates,
    ) -> Result<Option<String>> {
        let feature = FeatureArgs {
            id,
            title,
            kind,
            geometry_type,
            coordinates,
        }
        .into_feature()?;
        let feature_id = feature.id.clone();
        info!(
            "event=graphql_mutation module=graphql op=editFeature feature_id={}",
            log_value(&feature_id)
        );

        let outcome = run_store(ctx, move |service| service.edit_feature(&feature)).await?;
        settle(ctx, outcome, &feature_id, FEATURE_EDITED)
    }

    /// Remove the feature with `id`.
    async fn delete_feature(&self, ctx: &Context<'_>, id: ID) -> Result<Option<String>> {
        let feature_id = id.0;
        info!(
            "event=graphql_mutation module=graphql op=deleteFeature feature_id={}",
            log_value(&feature_id)
        );

        let target = feature_id.clone();
        let outcome = run_store(ctx, move |service| service.delete_feature(&target)).await?;
        settle(ctx, outcome, &feature_id, FEATURE_DELETED)
    }
}

/// Typed form of the add/edit argument list.
struct FeatureArgs {
    id: ID,
    title: String,
    kind: Option<String>,
    geometry_type: String,
    coordinates: Coordinates,
}

impl FeatureArgs {
    fn into_feature(self) -> Result<Feature> {
        let feature = Feature {
            id: self.id.0,
            title: self.title,
            kind: self.kind,
            geometry_type: self.geometry_type,
            coordinates: self.coordinates,
        };
        feature.validate().map_err(validation_error)?;
        Ok(feature)
    }
}

fn settle(
    ctx: &Context<'_>,
    outcome: MutationOutcome,
    id: &str,
    reply: &str,
) -> Result<Option<String>> {
    let policy = ctx
        .data_opt::<MissingTargetPolicy>()
        .copied()
        .unwrap_or_default();

    match (outcome, policy) {
        (MutationOutcome::NoMatch, MissingTargetPolicy::Reject) => Err(not_found_error(id)),
        _ => Ok(Some(reply.to_string())),
    }
}
