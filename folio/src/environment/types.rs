use folio_api_rest::RestServer as RestServerImpl;
use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_health_impl::HealthFeatureServiceImpl;
use folio_email_impl::EmailServiceImpl;
use folio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = RestServerImpl<HealthFeature, ContactFeature>;

// Shared
pub type Email = EmailServiceImpl;
pub type Template = TemplateServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Template, Email>;
pub type HealthFeature = HealthFeatureServiceImpl<Email>;
