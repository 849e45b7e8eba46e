use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_models::contact::{ContactMessage, ContactMessageError};

use super::error;
use crate::{
    extractors::form_or_json::FormOrJson,
    models::{contact::ApiContactMessage, ApiMessage},
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    FormOrJson(message): FormOrJson<ApiContactMessage>,
) -> Response {
    let message = match ContactMessage::try_from(message) {
        Ok(message) => message,
        Err(ContactMessageError::MissingField) => {
            return error(StatusCode::BAD_REQUEST, "Please fill all required fields")
        }
        Err(ContactMessageError::InvalidEmail) => {
            return error(
                StatusCode::BAD_REQUEST,
                "Please provide a valid email address",
            )
        }
    };

    match service.send_message(message).await {
        Ok(()) => Json(ApiMessage {
            success: true,
            message: "Message sent successfully!",
        })
        .into_response(),
        Err(err) => {
            let err = match err {
                ContactSendMessageError::Other(err) => err,
                err @ ContactSendMessageError::Send => err.into(),
            };
            tracing::error!("Error sending email: {err:#}");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send message. Please try again later.",
            )
        }
    }
}
