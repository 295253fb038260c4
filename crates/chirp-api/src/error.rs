use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error, warn};

use chirp_types::rules::Rejection;

use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Login failures are 401, every other rejection is 400.
pub fn rejection_status(rejection: Rejection) -> StatusCode {
    match rejection {
        Rejection::BadCredentials => StatusCode::UNAUTHORIZED,
        Rejection::InvalidAccount
        | Rejection::UsernameTaken
        | Rejection::InvalidMessage
        | Rejection::InvalidPatch => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    // Clients only ever see a status code; details go to the log.
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Service(ServiceError::Rejected(rejection)) => {
                debug!("Request rejected: {}", rejection);
                rejection_status(*rejection)
            }
            ApiError::Service(ServiceError::Storage(e)) => {
                error!("Storage failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::MalformedBody(msg) => {
                warn!("Malformed request body: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Join(e) => {
                error!("spawn_blocking join error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_db::DbError;

    #[test]
    fn rejections_map_to_client_errors() {
        assert_eq!(rejection_status(Rejection::BadCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(rejection_status(Rejection::InvalidAccount), StatusCode::BAD_REQUEST);
        assert_eq!(rejection_status(Rejection::UsernameTaken), StatusCode::BAD_REQUEST);
        assert_eq!(rejection_status(Rejection::InvalidMessage), StatusCode::BAD_REQUEST);
        assert_eq!(rejection_status(Rejection::InvalidPatch), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_body_is_server_error() {
        let response = ApiError::MalformedBody("expected value".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_failure_is_server_error() {
        let err = ServiceError::Storage(DbError::Sqlite(rusqlite::Error::InvalidQuery));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ServiceError::Storage(DbError::LockPoisoned("poisoned".into()));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn panicked_worker_is_server_error() {
        let join_err = tokio::task::spawn_blocking(|| {
            panic!("worker died");
        })
        .await
        .unwrap_err();
        let response = ApiError::from(join_err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
