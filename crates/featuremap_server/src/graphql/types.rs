//! GraphQL output types.

use async_graphql::{Object, ID};
use featuremap_core::{Coordinates, Feature};

/// `Feature` as exposed over GraphQL.
pub struct FeatureNode(pub Feature);

#[Object(name = "Feature")]
impl FeatureNode {
    async fn id(&self) -> ID {
        ID::from(self.0.id.as_str())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    #[graphql(name = "type")]
    async fn kind(&self) -> Option<&str> {
        self.0.kind.as_deref()
    }

    async fn geometry_type(&self) -> &str {
        &self.0.geometry_type
    }

    async fn coordinates(&self) -> &Coordinates {
        &self.0.coordinates
    }
}

impl From<Feature> for FeatureNode {
    fn from(value: Feature) -> Self {
        Self(value)
    }
}
