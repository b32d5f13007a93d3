use std::env;

use nport_filings::config::FALLBACK_USER_AGENT;
use nport_filings::EdgarConfig;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SEC_USER_AGENT`, if the operator configured one.
    pub user_agent: Option<String>,
    pub port: u16,
    pub static_dir: String,
    pub search_url: Option<String>,
    pub archives_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let user_agent = env::var("SEC_USER_AGENT")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if user_agent.is_none() {
            tracing::warn!(
                "SEC_USER_AGENT is not set. Copy .env.example to .env and add your name and email; \
                 EDGAR requires this header. Falling back to '{FALLBACK_USER_AGENT}'."
            );
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("PORT '{raw}' is not a valid port, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        Self {
            user_agent,
            port,
            static_dir,
            search_url: env::var("EDGAR_SEARCH_URL").ok(),
            archives_url: env::var("EDGAR_ARCHIVES_URL").ok(),
        }
    }

    pub fn is_user_agent_configured(&self) -> bool {
        self.user_agent.is_some()
    }

    /// User agent actually sent to EDGAR.
    pub fn effective_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(FALLBACK_USER_AGENT)
    }

    pub fn edgar_config(&self) -> EdgarConfig {
        let mut config = EdgarConfig::default().with_user_agent(self.effective_user_agent());
        if let Some(url) = &self.search_url {
            config = config.with_search_url(url.as_str());
        }
        if let Some(url) = &self.archives_url {
            config = config.with_archives_url(url.as_str());
        }
        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            port: DEFAULT_PORT,
            static_dir: "public".to_string(),
            search_url: None,
            archives_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_user_agent_falls_back() {
        let config = AppConfig::default();
        assert!(!config.is_user_agent_configured());
        assert_eq!(config.effective_user_agent(), FALLBACK_USER_AGENT);
    }

    #[test]
    fn edgar_config_applies_overrides() {
        let config = AppConfig {
            user_agent: Some("Jane Doe jane@example.com".into()),
            search_url: Some("http://localhost:9000/search".into()),
            ..AppConfig::default()
        };
        let edgar = config.edgar_config();
        assert_eq!(edgar.user_agent, "Jane Doe jane@example.com");
        assert_eq!(edgar.search_url, "http://localhost:9000/search");
        assert_eq!(edgar.archives_url, nport_filings::config::EDGAR_ARCHIVES_URL);
    }
}
