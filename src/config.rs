pub const DEFAULT_API_URL: &str = "https://api.honeycomb.io";
pub const DEFAULT_USER_AGENT: &str = "honeycombio-rs";

/// Header carrying the team API key on every request.
pub const API_KEY_HEADER: &str = "X-Honeycomb-Team";

pub const ENV_API_KEY: &str = "HONEYCOMBIO_APIKEY";
pub const ENV_API_URL: &str = "HONEYCOMBIO_APIURL";
pub const ENV_USER_AGENT: &str = "HONEYCOMBIO_USER_AGENT";

/// Client configuration. Blank fields mean "use the default"; see [`Config::merge`].
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Required. Team API key sent as `X-Honeycomb-Team`.
    pub api_key: String,
    pub api_url: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Layer `other` on top of `self`, copying every non-blank value.
    pub fn merge(self, other: &Config) -> Self {
        fn pick(base: String, over: &str) -> String {
            if over.trim().is_empty() {
                base
            } else {
                over.to_string()
            }
        }

        Self {
            api_key: pick(self.api_key, &other.api_key),
            api_url: pick(self.api_url, &other.api_url),
            user_agent: pick(self.user_agent, &other.user_agent),
        }
    }

    /// Defaults overridden by `HONEYCOMBIO_*` environment variables.
    /// A missing API key is not an error here; `Client::new` rejects it.
    pub fn from_env() -> Self {
        let overrides = Self {
            api_key: std::env::var(ENV_API_KEY).unwrap_or_default(),
            api_url: std::env::var(ENV_API_URL).unwrap_or_default(),
            user_agent: std::env::var(ENV_USER_AGENT).unwrap_or_default(),
        };
        Self::default().merge(&overrides)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("api_key", &key)
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key, "");
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn merge_copies_only_non_blank_values() {
        let overrides = Config {
            api_key: "key".to_string(),
            api_url: String::new(),
            user_agent: "  ".to_string(),
        };
        let merged = Config::default().merge(&overrides);
        assert_eq!(merged.api_key, "key");
        assert_eq!(merged.api_url, DEFAULT_API_URL);
        assert_eq!(merged.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn merge_overrides_url_and_agent() {
        let overrides = Config::new("key")
            .with_api_url("http://localhost:8080")
            .with_user_agent("terraform-provider");
        let merged = Config::default().merge(&overrides);
        assert_eq!(merged, overrides);
    }

    #[test]
    fn debug_redacts_api_key() {
        let printed = format!("{:?}", Config::new("super-secret"));
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
