use mongodb::error::Error as MongoError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    StoreUnreachable,
    CollectionAbsent,
    NotFound,
    NoModification,
    MalformedId,
    InvalidStatus,
    InvalidDate,
    Store,
}

/// Every failure the data layer reports to its callers.
///
/// Nothing below the handlers raises; each operation hands one of these back
/// so the caller can match on [`ServiceError::kind`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unable to reach the document store: {0}")]
    StoreUnreachable(String),

    #[error("collection '{0}' does not exist")]
    CollectionAbsent(&'static str),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("no modification applied to {entity} '{id}'")]
    NoModification { entity: &'static str, id: String },

    #[error("malformed identifier '{0}'")]
    MalformedId(String),

    #[error("invalid {entity} status '{value}'")]
    InvalidStatus { entity: &'static str, value: String },

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error(transparent)]
    Store(#[from] MongoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::StoreUnreachable(_) => ErrorKind::StoreUnreachable,
            ServiceError::CollectionAbsent(_) => ErrorKind::CollectionAbsent,
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
            ServiceError::NoModification { .. } => ErrorKind::NoModification,
            ServiceError::MalformedId(_) => ErrorKind::MalformedId,
            ServiceError::InvalidStatus { .. } => ErrorKind::InvalidStatus,
            ServiceError::InvalidDate(_) => ErrorKind::InvalidDate,
            ServiceError::Store(_) => ErrorKind::Store,
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn no_modification(entity: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NoModification {
            entity,
            id: id.into(),
        }
    }
}
