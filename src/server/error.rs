use crate::config::StatusMapping;
use crate::utils::error::{ErrorKind, GatewayError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error body returned by every failing route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn from_gateway(err: GatewayError, mapping: StatusMapping) -> Self {
        let mut detail = err.to_string();
        if detail.trim().is_empty() {
            detail = err.user_friendly_message();
        }
        Self {
            status: status_for(err.kind(), mapping),
            detail,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

pub fn status_for(kind: ErrorKind, mapping: StatusMapping) -> StatusCode {
    match mapping {
        StatusMapping::Uniform => StatusCode::INTERNAL_SERVER_ERROR,
        StatusMapping::Typed => match kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
            ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::Config | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_mapping_is_always_500() {
        for kind in [
            ErrorKind::InvalidInput,
            ErrorKind::NotFound,
            ErrorKind::Upstream,
            ErrorKind::Timeout,
            ErrorKind::Internal,
        ] {
            assert_eq!(
                status_for(kind, StatusMapping::Uniform),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn test_typed_mapping() {
        assert_eq!(
            status_for(ErrorKind::InvalidInput, StatusMapping::Typed),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(ErrorKind::NotFound, StatusMapping::Typed),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(ErrorKind::Upstream, StatusMapping::Typed),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(ErrorKind::Timeout, StatusMapping::Typed),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_detail_carries_error_message() {
        let err = ApiError::from_gateway(
            GatewayError::not_found("no race results found for 2021 round 99"),
            StatusMapping::Uniform,
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail, "no race results found for 2021 round 99");
    }
}
