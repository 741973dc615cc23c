//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for the area/element records this core
//!   owns.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Identity is assigned at create time and never changes.
//! - Owner-hint writes validate the tag before touching storage.

use crate::db::DbError;
use crate::model::area::AreaId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod area_repo;
pub mod element_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence and query errors for area/element storage.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target area does not exist.
    AreaNotFound(AreaId),
    /// Owner-hint value failed validation.
    InvalidHint(String),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::AreaNotFound(id) => write!(f, "content area not found: {id}"),
            Self::InvalidHint(value) => write!(f, "owner type hint is invalid: {value}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::AreaNotFound(_) => None,
            Self::InvalidHint(_) => None,
            Self::InvalidData(_) => None,
        }
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
