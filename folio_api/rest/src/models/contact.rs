use folio_models::contact::{ContactMessage, ContactMessageError};
use serde::Deserialize;

/// A contact form submission exactly as it was posted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactMessage {
    /// Full name of the sender
    pub name: Option<String>,
    /// Email address of the sender
    pub email: Option<String>,
    /// Subject of the message
    pub subject: Option<String>,
    /// Content of the message
    pub message: Option<String>,
}

impl TryFrom<ApiContactMessage> for ContactMessage {
    type Error = ContactMessageError;

    fn try_from(value: ApiContactMessage) -> Result<Self, Self::Error> {
        ContactMessage::validate(value.name, value.email, value.subject, value.message)
    }
}
