//! Feature repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-record CRUD APIs over the `features` table.
//! - Keep SQL and coordinate encoding inside the persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Feature::validate()` before SQL mutations.
//! - Uniqueness of `id` is enforced by the primary key, not by a pre-read.
//! - Read paths must reject undecodable persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::feature::{Coordinates, Feature, FeatureId, FeatureValidationError};
use rusqlite::{ffi, params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FEATURE_SELECT_SQL: &str = "SELECT
    id,
    title,
    type,
    geometry_type,
    coordinates
FROM features";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for feature persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(FeatureValidationError),
    Db(DbError),
    /// Insert collided with an existing primary key.
    DuplicateId(FeatureId),
    NotFound(FeatureId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "feature already exists: {id}"),
            Self::NotFound(id) => write!(f, "feature not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted feature data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<FeatureValidationError> for RepoError {
    fn from(value: FeatureValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for feature CRUD operations.
pub trait FeatureRepository {
    fn create_feature(&self, feature: &Feature) -> RepoResult<FeatureId>;
    /// Replaces every mutable field; `NotFound` when no row matches.
    fn replace_feature(&self, feature: &Feature) -> RepoResult<()>;
    fn get_feature(&self, id: &str) -> RepoResult<Option<Feature>>;
    /// Returns all features in insertion order.
    fn list_features(&self) -> RepoResult<Vec<Feature>>;
    /// Hard-deletes a feature; `NotFound` when no row matches.
    fn delete_feature(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed feature repository.
pub struct SqliteFeatureRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFeatureRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FeatureRepository for SqliteFeatureRepository<'_> {
    fn create_feature(&self, feature: &Feature) -> RepoResult<FeatureId> {
        feature.validate()?;
        let coordinates = encode_coordinates(&feature.coordinates)?;

        let inserted = self.conn.execute(
            "INSERT INTO features (
                id,
                title,
                type,
                geometry_type,
                coordinates
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                feature.id.as_str(),
                feature.title.as_str(),
                feature.kind.as_deref(),
                feature.geometry_type.as_str(),
                coordinates,
            ],
        );

        match inserted {
            Ok(_) => Ok(feature.id.clone()),
            Err(err) if is_unique_violation(&err) => {
                Err(RepoError::DuplicateId(feature.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn replace_feature(&self, feature: &Feature) -> RepoResult<()> {
        feature.validate()?;
        let coordinates = encode_coordinates(&feature.coordinates)?;

        let changed = self.conn.execute(
            "UPDATE features
             SET
                title = ?1,
                type = ?2,
                geometry_type = ?3,
                coordinates = ?4
             WHERE id = ?5;",
            params![
                feature.title.as_str(),
                feature.kind.as_deref(),
                feature.geometry_type.as_str(),
                coordinates,
                feature.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(feature.id.clone()));
        }

        Ok(())
    }

    fn get_feature(&self, id: &str) -> RepoResult<Option<Feature>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FEATURE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_feature_row(row)?));
        }

        Ok(None)
    }

    fn list_features(&self) -> RepoResult<Vec<Feature>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FEATURE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut features = Vec::new();

        while let Some(row) = rows.next()? {
            features.push(parse_feature_row(row)?);
        }

        Ok(features)
    }

    fn delete_feature(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM features WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

fn parse_feature_row(row: &Row<'_>) -> RepoResult<Feature> {
    let id: String = row.get("id")?;
    let coordinates_text: String = row.get("coordinates")?;
    let coordinates = decode_coordinates(&coordinates_text).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid coordinates for feature {id:?} in features.coordinates: {err}"
        ))
    })?;

    Ok(Feature {
        id,
        title: row.get("title")?,
        kind: row.get("type")?,
        geometry_type: row.get("geometry_type")?,
        coordinates,
    })
}

fn encode_coordinates(coordinates: &Coordinates) -> RepoResult<String> {
    serde_json::to_string(coordinates)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode coordinates: {err}")))
}

/// Parsing relies on serde_json's `float_roundtrip` so every `f64` reads back
/// bit-for-bit.
fn decode_coordinates(value: &str) -> serde_json::Result<Coordinates> {
    serde_json::from_str(value)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == ErrorCode::ConstraintViolation
                && (code.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE)
    )
}
