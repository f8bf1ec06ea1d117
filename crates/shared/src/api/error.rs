use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "backend")]
use {
    axum::{
        response::{IntoResponse, Response},
        Json,
    },
    tracing::error,
};

/// Placeholder for routes that have no domain specific errors
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("Nothing")]
pub struct Nothing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            error_messages: vec![message.into()],
        }
    }
}

/// Error returned from the API
///
/// `Inner` holds a route specific error (see
/// [`response_errors`](crate::api::response_errors)) together with the status
/// code it maps to. Everything the caller can't act on (database, pool,
/// hashing failures) ends up in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServerError<T> {
    Inner {
        #[serde(with = "http_serde::status_code")]
        code: StatusCode,
        inner: T,
    },
    Validation {
        inner: ValidationError,
    },
    Other {
        message: String,
    },
    WithContext {
        context: String,
        inner: Box<Self>,
    },
}

impl<T> ServerError<T> {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Inner { code, .. } => *code,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::WithContext { inner, .. } => inner.status_code(),
        }
    }

    /// Wraps the error with a description of what was being attempted
    pub fn context<S: Into<String>>(self, context: S) -> Self {
        Self::WithContext {
            context: context.into(),
            inner: Box::new(self),
        }
    }

    /// The route specific error, if there is one
    pub fn inner(&self) -> Option<&T> {
        match self {
            Self::Inner { inner, .. } => Some(inner),
            Self::WithContext { inner, .. } => inner.inner(),
            _ => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner { code, inner } => write!(f, "{code}: {inner:?}"),
            Self::Validation { inner } => {
                write!(f, "Validation failed: {}", inner.error_messages.join(", "))
            },
            Self::Other { message } => write!(f, "{message}"),
            Self::WithContext { context, inner } => write!(f, "{context}: {inner}"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for ServerError<T> {}

impl<T> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other {
            message: format!($($arg)*),
        }
    };
}

#[cfg(feature = "backend")]
mod backend {
    use deadpool_sqlite::{InteractError, PoolError};

    use super::ServerError;

    impl<T> From<rusqlite::Error> for ServerError<T> {
        fn from(err: rusqlite::Error) -> Self {
            Self::Other {
                message: format!("Database error: {err}"),
            }
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        fn from(err: InteractError) -> Self {
            Self::Other {
                message: format!("Database interact error: {err:?}"),
            }
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        fn from(err: PoolError) -> Self {
            Self::Other {
                message: format!("Database pool error: {err}"),
            }
        }
    }

    impl<T> From<rusqlite_migration::Error> for ServerError<T> {
        fn from(err: rusqlite_migration::Error) -> Self {
            Self::Other {
                message: format!("Migration error: {err:?}"),
            }
        }
    }

    impl<T> From<bcrypt::BcryptError> for ServerError<T> {
        fn from(err: bcrypt::BcryptError) -> Self {
            Self::Other {
                message: format!("Password hashing error: {err}"),
            }
        }
    }
}

#[cfg(feature = "backend")]
impl<T: Serialize + fmt::Debug> IntoResponse for ServerError<T> {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if code.is_server_error() {
            error!("{self}");
        }
        (code, Json(self)).into_response()
    }
}
