//! Process-lifetime store context.
//!
//! # Responsibility
//! - Own the single SQLite connection used by every request.
//! - Hand out short-lived `FeatureService` views bound to that connection.
//! - Define explicit init (`connect`) and teardown (`close`).
//!
//! # Invariants
//! - A failed connect leaves the context usable but unavailable; every
//!   store-backed call then fails with `StoreError::Unavailable`.
//! - Requests are serialized on the connection mutex.
//! - After `close`, the context behaves as unavailable.

use crate::db::{open_db_uri, DbError, DbResult};
use crate::repo::feature_repo::{RepoError, SqliteFeatureRepository};
use crate::service::feature_service::FeatureService;
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by store-backed operations.
#[derive(Debug)]
pub enum StoreError {
    /// No live connection: never connected, connect failed, or closed.
    Unavailable(String),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "feature store unavailable: {reason}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

enum ConnectionState {
    Connected(Connection),
    Unavailable(String),
}

/// Shared owner of the feature store connection.
pub struct StoreContext {
    state: Mutex<ConnectionState>,
}

impl StoreContext {
    /// Connects to the store named by `database_uri`.
    ///
    /// Never fails: a missing or unusable uri is logged and yields an
    /// unavailable context so the API can still start.
    pub fn connect(database_uri: Option<&str>) -> Self {
        let Some(uri) = database_uri else {
            error!("event=store_connect module=context status=error error_code=missing_uri");
            return Self::unavailable("no database uri configured");
        };

        match open_db_uri(uri) {
            Ok(conn) => {
                info!("event=store_connect module=context status=ok");
                Self::from_connection(conn)
            }
            Err(err) => {
                error!(
                    "event=store_connect module=context status=error error_code=connect_failed error={err}"
                );
                Self::unavailable(err.to_string())
            }
        }
    }

    /// Wraps an already opened and migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            state: Mutex::new(ConnectionState::Connected(conn)),
        }
    }

    /// Creates a context with no connection.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(ConnectionState::Unavailable(reason.into())),
        }
    }

    /// Returns whether a live connection is held.
    pub fn is_connected(&self) -> bool {
        matches!(
            self.lock().as_deref(),
            Ok(ConnectionState::Connected(_))
        )
    }

    /// Runs `op` against a feature service bound to the live connection.
    ///
    /// The connection lock is held for the whole call.
    pub fn with_service<T>(
        &self,
        op: impl FnOnce(&FeatureService<SqliteFeatureRepository<'_>>) -> Result<T, RepoError>,
    ) -> StoreResult<T> {
        let guard = self.lock()?;
        match &*guard {
            ConnectionState::Connected(conn) => {
                let service = FeatureService::new(SqliteFeatureRepository::new(conn));
                op(&service).map_err(StoreError::from)
            }
            ConnectionState::Unavailable(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    /// Closes the connection. Later calls see an unavailable store.
    ///
    /// Closing an unavailable context is a no-op.
    pub fn close(&self) -> DbResult<()> {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let previous = std::mem::replace(
            &mut *guard,
            ConnectionState::Unavailable("store closed".to_string()),
        );

        match previous {
            ConnectionState::Connected(conn) => {
                conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
                info!("event=store_close module=context status=ok");
                Ok(())
            }
            ConnectionState::Unavailable(_) => Ok(()),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, ConnectionState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}
