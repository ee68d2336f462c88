use crate::rule::AutoAddRule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings supplied by the embedding storefront page.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `Production` requires an `https` store URL.
    pub env: Environment,
    /// Store root, e.g. `"https://shop.example.com"`.
    pub store_url: String,
    /// Default `tracing` filter directive; `RUST_LOG` overrides it.
    pub log_level: String,
    pub currency: String,
    pub companion_handle: String,
    pub rule_color: String,
    pub rule_size: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Retries for product lookups only. Cart adds are never retried.
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl AppConfig {
    #[must_use]
    pub fn auto_add_rule(&self) -> AutoAddRule {
        AutoAddRule::new(&self.companion_handle, &self.rule_color, &self.rule_size)
    }
}
