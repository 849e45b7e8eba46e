use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/", routing::get(index))
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct IndexResponse {
    message: &'static str,
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Portfolio Contact API is running!",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { http: true, email })).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use folio_core_health_contracts::MockHealthFeatureService;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    async fn get(service: MockHealthFeatureService, uri: &str) -> (StatusCode, String) {
        let response = router(Arc::new(service))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn index() {
        // Act
        let (status, body) = get(MockHealthFeatureService::new(), "/").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"message":"Portfolio Contact API is running!"}"#);
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus { email: true });

        // Act
        let (status, body) = get(service, "/health").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"http":true,"email":true}"#);
    }

    #[tokio::test]
    async fn smtp_unreachable() {
        // Arrange
        let service =
            MockHealthFeatureService::new().with_get_status(HealthStatus { email: false });

        // Act
        let (status, body) = get(service, "/health").await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"http":true,"email":false}"#);
    }
}
