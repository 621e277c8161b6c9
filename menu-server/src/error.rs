//! Unified service-layer error type
//!
//! `ServiceError` bridges the gap between DB-layer errors
//! (`sqlx::Error`, `BoxError`) and the API-layer error (`AppError`).
//! It enables `?` propagation without manual
//! `.map_err(|e| { tracing::error!(...); AppError::new(...) })` boilerplate.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error — only two variants, keeps things simple.
///
/// - `Db`: Database/infrastructure errors (auto-logged, mapped to
///   InternalError; connectivity failures map to ServiceUnavailable)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error (sqlx, AWS SDK, serde, etc.)
    Db(BoxError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

/// The store is unreachable, as opposed to a query failing.
/// Callers get a distinct 503 so front ends can show "service
/// unavailable" instead of a generic failure.
fn is_connectivity(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
    )
}

fn unreachable_error() -> AppError {
    AppError::with_message(ErrorCode::ServiceUnavailable, "Database unreachable")
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        if is_connectivity(&e) {
            return ServiceError::App(unreachable_error());
        }
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        if let Some(sqlx_err) = e.downcast_ref::<sqlx::Error>()
            && is_connectivity(sqlx_err)
        {
            return ServiceError::App(unreachable_error());
        }
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_errors_map_to_service_unavailable() {
        let io = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        let err: ServiceError = io.into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ServiceUnavailable);

        let timeout: ServiceError = sqlx::Error::PoolTimedOut.into();
        let app: AppError = timeout.into();
        assert_eq!(app.code, ErrorCode::ServiceUnavailable);
    }

    #[test]
    fn other_errors_map_to_internal() {
        let err: ServiceError = sqlx::Error::RowNotFound.into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
    }

    #[test]
    fn boxed_connectivity_errors_are_classified() {
        let boxed: BoxError = Box::new(sqlx::Error::PoolClosed);
        let err: ServiceError = boxed.into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ServiceUnavailable);
    }

    #[test]
    fn app_errors_pass_through() {
        let err: ServiceError = AppError::not_found("Menu 7").into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::NotFound);
        assert!(app.message.contains("Menu 7"));
    }
}
