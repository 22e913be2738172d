//! Feature domain model.
//!
//! # Responsibility
//! - Define the canonical record for a titled geometric shape.
//! - Check required-field presence before a feature reaches storage.
//!
//! # Invariants
//! - `id` is supplied by the caller and never regenerated or rewritten.
//! - `id`, `title` and `geometry_type` are non-empty.
//! - `coordinates` and `geometry_type` carry no further structural checks.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied primary key of a feature.
pub type FeatureId = String;

/// Ordered list of coordinate tuples (pairs, rings, ...).
pub type Coordinates = Vec<Vec<f64>>;

/// Required-field violation detected by [`Feature::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureValidationError {
    /// A required string field is empty. Holds the wire field name.
    MissingField(&'static str),
}

impl Display for FeatureValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
        }
    }
}

impl Error for FeatureValidationError {}

/// A named shape with its coordinate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: FeatureId,
    pub title: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Free text such as `Point` or `Polygon`; not checked against a list.
    pub geometry_type: String,
    pub coordinates: Coordinates,
}

impl Feature {
    /// Creates a feature without an optional `type`.
    pub fn new(
        id: impl Into<FeatureId>,
        title: impl Into<String>,
        geometry_type: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: None,
            geometry_type: geometry_type.into(),
            coordinates,
        }
    }

    /// Sets the optional `type` field.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Checks required-field presence.
    ///
    /// Empty strings count as missing. Fields are checked in schema order and
    /// the first violation is returned.
    pub fn validate(&self) -> Result<(), FeatureValidationError> {
        let required = [
            ("id", self.id.as_str()),
            ("title", self.title.as_str()),
            ("geometryType", self.geometry_type.as_str()),
        ];

        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(FeatureValidationError::MissingField(*field)),
            None => Ok(()),
        }
    }
}
