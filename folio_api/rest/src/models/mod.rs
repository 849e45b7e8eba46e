use serde::Serialize;

pub mod contact;

/// Outcome of a request as reported to the contact form.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: &'static str,
}
