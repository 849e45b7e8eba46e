use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use folio_models::email_address::EmailAddressWithName;
use serde::Deserialize;

mod duration;

/// Built-in defaults, see `config.toml` in the workspace root.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG_PATH";

/// Environment variables that override single config keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "http.port"),
    ("EMAIL_SMTP_URL", "email.smtp_url"),
    ("EMAIL_USER", "email.username"),
    ("EMAIL_PASS", "email.password"),
];

/// Load the config from the built-in defaults, the files listed in
/// `FOLIO_CONFIG_PATH` and the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATH_ENV)
        .map(|paths| {
            paths
                .split(':')
                .filter(|x| !x.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    load_with(&paths, |name| std::env::var(name).ok())
}

/// Load the config from the built-in defaults and `paths` (later files take
/// precedence), then apply the overrides found by looking up environment
/// variable names with `env`.
pub fn load_with(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    // `PORT=` in a .env file means unset
    let env = |name: &str| env(name).filter(|value| !value.is_empty());

    let builder = paths.iter().try_fold(
        config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
        |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
        },
    )?;

    let builder = ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(name, key)| {
            builder.set_override_option(key, env(name))
        })?
        // the mail account doubles as sender unless a sender is given explicitly
        .set_override_option("email.from", env("EMAIL_FROM").or_else(|| env("EMAIL_USER")))?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: EmailAddressWithName,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_url", &self.smtp_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("from", &self.from)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of all contact form submissions
    pub email: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const NO_PATHS: &[&str] = &[];

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = load_with(NO_PATHS, env(&[("EMAIL_USER", "me@example.com")])).unwrap();

        assert_eq!(config.http.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.email.smtp_url, "smtps://smtp.gmail.com");
        assert_eq!(config.email.password, None);
        assert_eq!(config.contact.email.0.email.domain(), "gmail.com");
        assert_eq!(*config.health.cache_ttl, std::time::Duration::from_secs(10));
    }

    #[test]
    fn environment_overrides() {
        let config = load_with(
            NO_PATHS,
            env(&[
                ("PORT", "8080"),
                ("EMAIL_SMTP_URL", "smtp://localhost:2525"),
                ("EMAIL_USER", "me@example.com"),
                ("EMAIL_PASS", "app password"),
            ]),
        )
        .unwrap();

        assert_eq!(config.http.port, 8080);
        assert_eq!(config.email.smtp_url, "smtp://localhost:2525");
        assert_eq!(config.email.username.as_deref(), Some("me@example.com"));
        assert_eq!(config.email.password.as_deref(), Some("app password"));
        assert_eq!(config.email.from.to_string(), "me@example.com");
    }

    #[test]
    fn empty_variables_are_ignored() {
        let config = load_with(
            NO_PATHS,
            env(&[
                ("PORT", ""),
                ("EMAIL_SMTP_URL", ""),
                ("EMAIL_USER", "me@example.com"),
                ("EMAIL_PASS", ""),
                ("EMAIL_FROM", ""),
            ]),
        )
        .unwrap();

        assert_eq!(config.http.port, 3000);
        assert_eq!(config.email.smtp_url, "smtps://smtp.gmail.com");
        assert_eq!(config.email.password, None);
        assert_eq!(config.email.from.email(), "me@example.com");
    }

    #[test]
    fn explicit_sender() {
        let config = load_with(
            NO_PATHS,
            env(&[
                ("EMAIL_USER", "me@example.com"),
                ("EMAIL_FROM", "Portfolio <noreply@example.com>"),
            ]),
        )
        .unwrap();

        assert_eq!(config.email.from.0.name.as_deref(), Some("Portfolio"));
        assert_eq!(config.email.from.email(), "noreply@example.com");
    }

    #[test]
    fn missing_sender() {
        assert!(load_with(NO_PATHS, env(&[])).is_err());
    }

    #[test]
    fn invalid_port() {
        let result = load_with(
            NO_PATHS,
            env(&[("EMAIL_USER", "me@example.com"), ("PORT", "http")]),
        );

        assert!(result.is_err());
    }

    #[test]
    fn debug_hides_password() {
        let config = load_with(
            NO_PATHS,
            env(&[("EMAIL_USER", "me@example.com"), ("EMAIL_PASS", "hunter2")]),
        )
        .unwrap();

        let debug = format!("{config:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn missing_config_file() {
        let result = load_with(&["/nonexistent/folio.toml"], env(&[]));

        assert!(result.is_err());
    }
}
