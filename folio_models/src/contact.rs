use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use thiserror::Error;

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: Option<ContactMessageSubject>,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: ContactMessageAuthorEmail,
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(regex = EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorEmail(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactMessageError {
    #[error("A required field is missing or empty.")]
    MissingField,
    #[error("The email address is invalid.")]
    InvalidEmail,
}

impl ContactMessage {
    /// Validate the raw fields of a contact form submission.
    ///
    /// Presence of `name`, `email` and `content` is checked before the format
    /// of `email`. An empty `subject` is treated like a missing one.
    pub fn validate(
        name: Option<String>,
        email: Option<String>,
        subject: Option<String>,
        content: Option<String>,
    ) -> Result<Self, ContactMessageError> {
        let name = name.and_then(|x| ContactMessageAuthorName::try_new(x).ok());
        let email = email.filter(|x| !x.is_empty());
        let content = content.and_then(|x| ContactMessageContent::try_new(x).ok());

        let (Some(name), Some(email), Some(content)) = (name, email, content) else {
            return Err(ContactMessageError::MissingField);
        };

        let email = ContactMessageAuthorEmail::try_new(email)
            .map_err(|_| ContactMessageError::InvalidEmail)?;

        Ok(Self {
            author: ContactMessageAuthor { name, email },
            subject: subject.and_then(|x| ContactMessageSubject::try_new(x).ok()),
            content,
        })
    }
}
