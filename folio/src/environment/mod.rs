use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::ContactFeatureConfig;
use folio_core_health_impl::HealthFeatureConfig;
use types::{ContactFeature, Email, HealthFeature, RestServer, Template};

pub mod types;

/// Wires the concrete services together.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ConfigProvider,
    email: Email,
    template: Template,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            config,
            email,
            template: Template::default(),
        }
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.health_feature(),
            self.contact_feature(),
            self.config.rest_server_config.clone(),
        )
    }

    pub fn contact_feature(&self) -> ContactFeature {
        ContactFeature::new(
            self.template.clone(),
            self.email.clone(),
            self.config.contact_feature_config.clone(),
        )
    }

    pub fn health_feature(&self) -> HealthFeature {
        HealthFeature::new(
            self.email.clone(),
            self.config.health_feature_config.clone(),
        )
    }
}

/// Service configs derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    // API
    rest_server_config: RestServerConfig,

    // Core
    contact_feature_config: ContactFeatureConfig,
    health_feature_config: HealthFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            host: config.http.host,
            port: config.http.port,
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            email: config.contact.email.clone().into(),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Self {
            rest_server_config,
            contact_feature_config,
            health_feature_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[tokio::test]
    async fn provide_rest_server() {
        let env = HashMap::from([
            ("EMAIL_USER", "portfolio@example.com"),
            ("EMAIL_PASS", "hunter2"),
        ]);
        let no_paths: &[&str] = &[];
        let config =
            folio_config::load_with(no_paths, |key| env.get(key).map(|&value| value.to_owned()))
                .unwrap();
        let email = Email::new(&config.email.smtp_url, None, config.email.from.clone())
            .await
            .unwrap();

        let provider = Provider::new(ConfigProvider::new(&config), email);
        let _: RestServer = provider.rest_server();
    }
}
