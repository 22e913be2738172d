//! GraphQL API layer.
//!
//! Declares the `Feature` type, the `allFeatures`/`hello` queries and the
//! add/edit/delete mutations:
//!
//! ```graphql
//! type Feature {
//!   id: ID!
//!   title: String!
//!   type: String
//!   geometryType: String!
//!   coordinates: [[Float!]!]!
//! }
//! ```
//!
//! Argument presence and types are checked by the executor before any
//! resolver runs. Resolvers hand store work to a blocking worker so SQLite
//! never stalls the async runtime.

pub mod error;
pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{Context, EmptySubscription, Schema};
use featuremap_core::{FeatureService, RepoResult, SqliteFeatureRepository, StoreContext};
use log::error;
use std::sync::Arc;

use self::error::{data_access_error, store_error};
use self::mutation::MutationRoot;
use self::query::QueryRoot;

/// The full GraphQL schema type for the feature API.
pub type FeatureSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// How edit/delete report a missing target feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTargetPolicy {
    /// Report success; the store is left unchanged.
    #[default]
    Ignore,
    /// Fail with a `NOT_FOUND` error.
    Reject,
}

/// Build the GraphQL schema with the shared store context injected.
pub fn build_schema(store: Arc<StoreContext>, policy: MissingTargetPolicy) -> FeatureSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(policy)
        .finish()
}

/// Runs one store operation on the blocking pool.
pub(crate) async fn run_store<T, F>(ctx: &Context<'_>, op: F) -> async_graphql::Result<T>
where
    T: Send + 'static,
    F: FnOnce(&FeatureService<SqliteFeatureRepository<'_>>) -> RepoResult<T> + Send + 'static,
{
    let store = Arc::clone(ctx.data::<Arc<StoreContext>>()?);

    match tokio::task::spawn_blocking(move || store.with_service(op)).await {
        Ok(result) => result.map_err(store_error),
        Err(err) => {
            error!("event=store_call module=graphql status=error error_code=worker_failed error={err}");
            Err(data_access_error())
        }
    }
}
