use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://secure.runescape.com";
pub const DEFAULT_USER_AGENT: &str = concat!("grand-exchange/", env!("CARGO_PKG_VERSION"));
/// Fetches allowed in flight at once during a batch.
pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which item database the requests are routed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Catalogue {
    /// RuneScape 3 item database.
    #[default]
    RuneScape,
    /// Old School RuneScape item database.
    OldSchool,
}

impl Catalogue {
    /// Path segment selecting this database under the base URL.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Catalogue::RuneScape => "m=itemdb_rs",
            Catalogue::OldSchool => "m=itemdb_oldschool",
        }
    }
}

impl Display for Catalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Catalogue::RuneScape => write!(f, "rs"),
            Catalogue::OldSchool => write!(f, "osrs"),
        }
    }
}

#[derive(Builder, Clone, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ClientConfig {
    /// Scheme and host of the item database, e.g. `https://secure.runescape.com`
    #[builder(setter(into), default = "String::from(DEFAULT_BASE_URL)")]
    pub base_url: String,
    /// Item database to query
    #[builder(default)]
    pub catalogue: Catalogue,
    /// Upper bound on concurrent fetches within one batch
    #[builder(default = "DEFAULT_CONCURRENCY")]
    pub concurrency: usize,
    /// Time allowed for a single request, body included
    #[builder(default = "DEFAULT_REQUEST_TIMEOUT")]
    pub request_timeout: Duration,
    /// Time allowed for a whole batch; targets still outstanding at expiry are reported as failures
    #[builder(setter(strip_option), default)]
    pub batch_deadline: Option<Duration>,
    /// Value sent in the `User-Agent` header
    #[builder(setter(into), default = "String::from(DEFAULT_USER_AGENT)")]
    pub user_agent: String,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            catalogue: Catalogue::default(),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            batch_deadline: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.concurrency == Some(0) {
            return Err("concurrency must be at least 1".to_string());
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err("request timeout must be non-zero".to_string());
        }
        if let Some(base_url) = &self.base_url {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(format!(
                    "base url '{base_url}' must start with http:// or https://"
                ));
            }
        }
        Ok(())
    }
}
