use std::sync::Arc;

use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::{
    contact::{ContactMessage, ContactMessageSubject},
    email_address::EmailAddressWithName,
};
use folio_templates_contracts::{ContactMessageTemplate, TemplateService};
use tracing::debug;

const NO_SUBJECT: &str = "No subject provided";

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Template, Email> {
    template: Template,
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Recipient of all contact form submissions
    pub email: Arc<EmailAddressWithName>,
}

impl<Template, Email> ContactFeatureServiceImpl<Template, Email> {
    pub fn new(template: Template, email: Email, config: ContactFeatureConfig) -> Self {
        Self {
            template,
            email,
            config,
        }
    }
}

impl<Template, EmailS> ContactFeatureService for ContactFeatureServiceImpl<Template, EmailS>
where
    Template: TemplateService,
    EmailS: EmailService,
{
    async fn send_message(&self, message: ContactMessage) -> Result<(), ContactSendMessageError> {
        let name = message.author.name.into_inner();
        let author_email = message.author.email.into_inner();
        let subject = message.subject.map(ContactMessageSubject::into_inner);

        let body = self.template.render(&ContactMessageTemplate {
            name: name.clone(),
            email: author_email.clone(),
            subject: subject.clone().unwrap_or_else(|| NO_SUBJECT.into()),
            message: message.content.into_inner(),
        })?;

        let email = Email {
            recipient: (*self.config.email).clone(),
            subject: subject.unwrap_or_else(|| format!("Portfolio Contact from {name}")),
            body,
            content_type: ContentType::Html,
            reply_to: Some(author_email),
        };

        if !self.email.send(email).await? {
            return Err(ContactSendMessageError::Send);
        }

        debug!("contact message delivered");

        Ok(())
    }
}
