//! Error types for the data access layer.

use folio_core::password::PasswordError;
use folio_core::types::DbId;

/// PostgreSQL SQLSTATE for unique constraint violations.
pub const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign key violations.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Symbolic code for pool acquisition timeouts.
pub const POOL_TIMED_OUT: &str = "POOL_TIMED_OUT";

/// A statement failed in the driver or the database.
///
/// `code` carries the SQLSTATE when the server reported one, otherwise a
/// symbolic driver code (`POOL_TIMED_OUT`, `IO_ERROR`, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DbError {
    pub message: String,
    pub code: Option<String>,
}

impl DbError {
    pub fn new(message: impl Into<String>, code: Option<&str>) -> Self {
        Self {
            message: message.into(),
            code: code.map(str::to_string),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code() == Some(UNIQUE_VIOLATION)
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.code() == Some(FOREIGN_KEY_VIOLATION)
    }

    pub fn is_pool_timeout(&self) -> bool {
        self.code() == Some(POOL_TIMED_OUT)
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            return Self {
                message: db_err.message().to_string(),
                code: db_err.code().map(|c| c.into_owned()),
            };
        }

        let code = match &err {
            sqlx::Error::PoolTimedOut => Some(POOL_TIMED_OUT),
            sqlx::Error::PoolClosed => Some("POOL_CLOSED"),
            sqlx::Error::Io(_) => Some("IO_ERROR"),
            sqlx::Error::Tls(_) => Some("TLS_ERROR"),
            sqlx::Error::Protocol(_) => Some("PROTOCOL_ERROR"),
            sqlx::Error::Configuration(_) => Some("CONFIGURATION_ERROR"),
            sqlx::Error::RowNotFound => Some("ROW_NOT_FOUND"),
            sqlx::Error::Encode(_) => Some("ENCODE_ERROR"),
            sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => Some("DECODE_ERROR"),
            _ => None,
        };
        Self::new(err.to_string(), code)
    }
}

/// Failure of a model operation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The row exists but the update would not change it.
    #[error("No changes made to {entity} with id {id}")]
    NoChanges { entity: &'static str, id: DbId },

    #[error("Password is required")]
    PasswordRequired,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Project not found or not published")]
    ProjectNotPublished,

    #[error("Unable to get stats")]
    StatsUnavailable,

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl ModelError {
    /// Machine-readable code for the wire envelope.
    pub fn code(&self) -> Option<&str> {
        match self {
            ModelError::Database(err) => err.code(),
            ModelError::NotFound { .. } => Some("NOT_FOUND"),
            ModelError::NoChanges { .. } => Some("NO_CHANGES"),
            ModelError::PasswordRequired => Some("PASSWORD_REQUIRED"),
            ModelError::UserNotFound => Some("USER_NOT_FOUND"),
            ModelError::InvalidPassword => Some("INVALID_PASSWORD"),
            ModelError::ProjectNotPublished => Some("NOT_FOUND"),
            ModelError::StatsUnavailable => Some("STATS_UNAVAILABLE"),
            ModelError::Password(_) => Some("PASSWORD_HASH_ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_keeps_symbolic_code() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(err.is_pool_timeout());
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn row_not_found_has_code() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.code(), Some("ROW_NOT_FOUND"));
    }

    #[test]
    fn model_error_messages_are_distinguishable() {
        assert_eq!(ModelError::UserNotFound.to_string(), "User not found");
        assert_eq!(ModelError::InvalidPassword.to_string(), "Invalid password");
        assert_eq!(
            ModelError::NotFound { entity: "Project", id: 3 }.to_string(),
            "Project with id 3 not found"
        );
        assert_eq!(
            ModelError::NoChanges { entity: "Project", id: 3 }.to_string(),
            "No changes made to Project with id 3"
        );
    }

    #[test]
    fn database_errors_surface_their_code() {
        let err = ModelError::from(DbError::new("duplicate key", Some(UNIQUE_VIOLATION)));
        assert_eq!(err.code(), Some(UNIQUE_VIOLATION));
        assert_eq!(err.to_string(), "duplicate key");
    }
}
