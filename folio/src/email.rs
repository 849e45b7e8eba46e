use anyhow::Context;
use folio_config::EmailConfig;
use folio_email_impl::{EmailServiceImpl, SmtpCredentials};
use tracing::warn;

/// Set up the smtp transport, authenticating if credentials are configured.
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let credentials = match (&config.username, &config.password) {
        (Some(username), Some(password)) => Some(SmtpCredentials {
            username: username.clone(),
            password: password.clone(),
        }),
        (Some(_), None) => {
            warn!("Smtp username is set but password is missing, connecting without credentials");
            None
        }
        _ => None,
    };

    EmailServiceImpl::new(&config.smtp_url, credentials, config.from.clone())
        .await
        .context("Failed to set up smtp transport")
}
