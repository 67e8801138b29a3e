//! Conversions from external infrastructure errors into console errors.
//!
//! Two targets: [`StorageError`] for key-value substrate failures (which the
//! storage wrapper swallows) and [`ConsoleError`] for everything surfaced to
//! callers (seed loading, configuration, pool setup).

use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use seller_console_core::storage::StorageError;
use seller_console_domain::ConsoleError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ConsoleError);

impl From<InfraError> for ConsoleError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ConsoleError> for InfraError {
    fn from(value: ConsoleError) -> Self {
        InfraError(value)
    }
}

/// Map a foreign error onto the substrate port's error type.
pub trait IntoStorageError {
    fn into_storage_error(self) -> StorageError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error */
/* -------------------------------------------------------------------------- */

impl IntoStorageError for SqlError {
    fn into_storage_error(self) -> StorageError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DiskFull => {
                        StorageError::QuotaExceeded("database or disk is full".into())
                    }
                    ErrorCode::DatabaseBusy => StorageError::Unavailable("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        StorageError::Unavailable("database is locked".into())
                    }
                    ErrorCode::CannotOpen => {
                        StorageError::Unavailable(format!("unable to open database: {message}"))
                    }
                    ErrorCode::ReadOnly => {
                        StorageError::Unavailable("database is read-only".into())
                    }
                    _ => StorageError::Backend(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                StorageError::Backend(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                StorageError::Backend(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(..) => StorageError::Backend("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidPath(path) => StorageError::Unavailable(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => StorageError::Backend(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(ConsoleError::Storage(value.into_storage_error().to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error */
/* -------------------------------------------------------------------------- */

impl IntoStorageError for PoolError {
    fn into_storage_error(self) -> StorageError {
        StorageError::Unavailable(format!("connection pool: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(ConsoleError::Storage(value.into_storage_error().to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error, serde_json::Error, toml::de::Error */
/* -------------------------------------------------------------------------- */

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let mapped = match value.kind() {
            ErrorKind::NotFound => ConsoleError::NotFound(format!("file not found: {value}")),
            ErrorKind::PermissionDenied => {
                ConsoleError::Storage(format!("permission denied: {value}"))
            }
            _ => ConsoleError::Internal(format!("io error: {value}")),
        };
        InfraError(mapped)
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let mapped = match value.classify() {
            Category::Io => ConsoleError::Internal(format!("json io error: {value}")),
            Category::Syntax | Category::Data | Category::Eof => {
                ConsoleError::Validation(format!("invalid JSON: {value}"))
            }
        };
        InfraError(mapped)
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(ConsoleError::Config(format!("Invalid TOML format: {value}")))
    }
}
