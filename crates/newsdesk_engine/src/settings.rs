use std::time::Duration;

pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:5000/api";
pub const PRODUCTION_BASE_URL: &str = "/.netlify/functions";
pub const LISTING_ENDPOINT: &str = "/scrape";
pub const ARTICLE_ENDPOINT: &str = "/scrape-article";

/// Deployment flavour; picks the default backend location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Environment::Development => DEVELOPMENT_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Prefix for both endpoints, used verbatim.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ApiSettings {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            base_url: environment.default_base_url().to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn listing_url(&self) -> String {
        format!("{}{}", self.base_url, LISTING_ENDPOINT)
    }

    pub fn article_url(&self) -> String {
        format!("{}{}", self.base_url, ARTICLE_ENDPOINT)
    }
}
