use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::Response,
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::routes::error;

/// Deserializes the request body as json or url encoded form data, depending
/// on the `Content-Type` header.
///
/// Requests without a body or with any other content type yield
/// `T::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormOrJson<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(mime) = headers
        .get(CONTENT_TYPE)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.split(';').next())
        .map(|x| x.trim().to_ascii_lowercase())
    else {
        return BodyKind::Other;
    };

    if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
    {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(request.headers()) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(request, state)
                    .await
                    .map_err(|err| invalid_body(err.body_text()))?;
                if bytes.is_empty() {
                    return Ok(Self(T::default()));
                }
                Json::<T>::from_bytes(&bytes)
                    .map(|Json(value)| Self(value))
                    .map_err(|err| invalid_body(err.body_text()))
            }
            BodyKind::Form => Form::<T>::from_request(request, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(|err| invalid_body(err.body_text())),
            BodyKind::Other => Ok(Self(T::default())),
        }
    }
}

fn invalid_body(reason: String) -> Response {
    debug!(%reason, "rejecting request body");
    error(StatusCode::BAD_REQUEST, "Invalid request body")
}
