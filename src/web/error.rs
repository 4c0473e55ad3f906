use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::error::LookupError;

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing query parameters.
    BadQuery(String),
    Lookup(LookupError),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        ApiError::Lookup(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Lookup(LookupError::Upstream(err))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadQuery(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Lookup(
                LookupError::InvalidRadius { .. } | LookupError::UnsupportedGranularity { .. },
            ) => StatusCode::NOT_FOUND,
            ApiError::Lookup(LookupError::ProviderShape(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Lookup(
                LookupError::ProviderUnavailable { .. } | LookupError::Upstream(_),
            ) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::BadQuery(message) => message.clone(),
            ApiError::Lookup(err) => format!("{err:#}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        if status.is_server_error() {
            error!(%status, %detail, "Lookup failed");
        } else {
            warn!(%status, %detail, "Lookup rejected");
        }

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Granularity, Molecule};

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_radius_is_not_found() {
        let response = ApiError::from(LookupError::InvalidRadius { radius: 5 }).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_of(response).await["detail"],
            "Case 5 of less than eight (8) cannot be used."
        );
    }

    #[test]
    fn test_unsupported_granularity_is_not_found() {
        let err = ApiError::from(LookupError::UnsupportedGranularity {
            molecule: Molecule::N2o,
            granularity: Granularity::Weekly,
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_provider_failures_map_to_server_errors() {
        assert_eq!(
            ApiError::from(LookupError::shape("daily.precipitation_sum missing")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(LookupError::ProviderUnavailable {
                provider: "air quality",
                reason: "Latitude must be in range".to_string(),
            })
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("connection refused")).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_bad_query_is_json_bad_request() {
        let response = ApiError::BadQuery("missing field `latitude`".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await["detail"], "missing field `latitude`");
    }
}
