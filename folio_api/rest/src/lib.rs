use std::{net::IpAddr, sync::Arc};

use axum::Router;
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: Arc<RestServerConfig>,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config: config.into(),
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let RestServerConfig { host, port } = *self.config;
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(Arc::new(self.health)))
            .merge(routes::contact::router(Arc::new(self.contact)));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(router)
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use folio_core_contact_contracts::MockContactFeatureService;
    use folio_core_health_contracts::MockHealthFeatureService;
    use tower::ServiceExt;

    use super::*;

    fn sut() -> Router<()> {
        RestServer::new(
            MockHealthFeatureService::new(),
            MockContactFeatureService::new(),
            RestServerConfig {
                host: IpAddr::from([127, 0, 0, 1]),
                port: 3000,
            },
        )
        .router()
    }

    #[tokio::test]
    async fn any_origin_is_allowed() {
        // Act
        let response = sut()
            .oneshot(
                Request::get("/")
                    .header("Origin", "https://portfolio.example.net")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn preflight() {
        // Act
        let response = sut()
            .oneshot(
                Request::options("/api/contact")
                    .header("Origin", "https://portfolio.example.net")
                    .header("Access-Control-Request-Method", "POST")
                    .header("Access-Control-Request-Headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn request_id_header() {
        // Act
        let response = sut()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert!(response.headers().contains_key("X-Request-Id"));
    }

    #[tokio::test]
    async fn unknown_route() {
        // Act
        let response = sut()
            .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), 404);
    }
}
