//! Mapping from store errors to GraphQL errors.
//!
//! Every error carries `extensions.code`. Data-access failures expose only a
//! generic message; the detail goes to the log.

use async_graphql::{Error, ErrorExtensions};
use featuremap_core::{FeatureValidationError, RepoError, StoreError};
use log::error;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationFailed,
    DuplicateId,
    NotFound,
    DataAccess,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::DuplicateId => "DUPLICATE_ID",
            Self::NotFound => "NOT_FOUND",
            Self::DataAccess => "DATA_ACCESS",
        }
    }
}

pub(crate) fn coded_error(code: ErrorCode, message: impl Display) -> Error {
    Error::new(message.to_string())
        .extend_with(|_, extensions| extensions.set("code", code.as_str()))
}

pub(crate) fn validation_error(err: FeatureValidationError) -> Error {
    coded_error(ErrorCode::ValidationFailed, err.to_string())
}

pub(crate) fn not_found_error(id: &str) -> Error {
    coded_error(ErrorCode::NotFound, format!("feature not found: {id}"))
}

pub(crate) fn data_access_error() -> Error {
    coded_error(ErrorCode::DataAccess, "feature store request failed")
}

pub(crate) fn store_error(err: StoreError) -> Error {
    match err {
        StoreError::Repo(RepoError::Validation(inner)) => validation_error(inner),
        StoreError::Repo(RepoError::DuplicateId(id)) => coded_error(
            ErrorCode::DuplicateId,
            format!("feature with id `{id}` already exists"),
        ),
        StoreError::Repo(RepoError::NotFound(id)) => not_found_error(&id),
        other => {
            error!("event=store_call module=graphql status=error error_code=data_access error={other}");
            data_access_error()
        }
    }
}
