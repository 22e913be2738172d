//! Query root.

use async_graphql::{Context, Object, Result};
use log::info;

use super::run_store;
use super::types::FeatureNode;

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every stored feature, in storage order. No paging.
    async fn all_features(&self, ctx: &Context<'_>) -> Result<Vec<FeatureNode>> {
        info!("event=graphql_query module=graphql op=allFeatures");
        let features = run_store(ctx, |service| service.all_features()).await?;
        Ok(features.into_iter().map(FeatureNode::from).collect())
    }

    /// Liveness probe; independent of the store.
    async fn hello(&self) -> Option<&'static str> {
        Some(featuremap_core::hello())
    }
}
