use anyhow::{anyhow, ensure};
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::email_address::EmailAddressWithName;
use folio_utils::Apply;
use lettre::{
    message::{
        header::{self, HeaderName, HeaderValue},
        MessageBuilder,
    },
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl EmailServiceImpl {
    /// Create a transport for the given smtp url, e.g. `smtps://smtp.gmail.com`.
    ///
    /// No connection is established until the first email is sent or the
    /// server is pinged.
    pub async fn new(
        url: &str,
        credentials: Option<SmtpCredentials>,
        from: EmailAddressWithName,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?
            .apply_map(credentials, |builder, SmtpCredentials { username, password }| {
                builder.credentials(Credentials::new(username, password))
            })
            .build();

        Ok(Self { from, transport })
    }
}

const REPLY_TO: HeaderName = HeaderName::new_from_ascii_str("Reply-To");

fn reply_to_header(reply_to: String) -> anyhow::Result<HeaderValue> {
    ensure!(
        !reply_to.contains(['\r', '\n']),
        "Reply-To must not contain line breaks"
    );
    Ok(HeaderValue::new(REPLY_TO, reply_to))
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let reply_to = email.reply_to.map(reply_to_header).transpose()?;

        let message = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(reply_to, MessageBuilder::raw_header)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)?;

        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "smtp server responded");

        Ok(response.is_positive())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_with_credentials() {
        EmailServiceImpl::new(
            "smtps://smtp.example.com",
            Some(SmtpCredentials {
                username: "portfolio@example.com".into(),
                password: "secret".into(),
            }),
            "portfolio@example.com".parse().unwrap(),
        )
        .await
        .unwrap();
    }

    #[test]
    fn reply_to_is_kept_verbatim() {
        for address in ["ann@example.com", "ann..smith@example.com", "a\"b@x.y"] {
            let header = reply_to_header(address.into()).unwrap();

            let message = Message::builder()
                .from("portfolio@example.com".parse().unwrap())
                .to("owner@example.com".parse().unwrap())
                .raw_header(header)
                .body(String::new())
                .unwrap();

            let formatted = String::from_utf8(message.formatted()).unwrap();
            assert!(
                formatted.contains(&format!("Reply-To: {address}\r\n")),
                "{formatted}"
            );
        }
    }

    #[test]
    fn reply_to_rejects_line_breaks() {
        assert!(reply_to_header("ann@example.com\r\nBcc: x@y.z".into()).is_err());
    }

    #[tokio::test]
    async fn new_invalid_url() {
        let result = EmailServiceImpl::new(
            "not a url",
            None,
            "portfolio@example.com".parse().unwrap(),
        )
        .await;

        assert!(result.is_err());
    }
}
