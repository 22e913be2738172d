//! HTTP transport for the GraphQL schema.
//!
//! # Responsibility
//! - Serve GraphQL-over-HTTP JSON on `POST /` and `POST /graphql`.
//! - Serve the GraphiQL explorer on `GET /` and `GET /graphql`.

use async_graphql::http::GraphiQLSource;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use log::debug;

use crate::graphql::FeatureSchema;

const GRAPHQL_PATH: &str = "/graphql";

pub fn router(schema: FeatureSchema) -> Router {
    Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .with_state(schema)
}

async fn graphql_handler(
    State(schema): State<FeatureSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    debug!(
        "event=graphql_request module=http operation={}",
        request.operation_name.as_deref().unwrap_or("-")
    );
    Json(schema.execute(request).await)
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
