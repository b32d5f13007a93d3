use std::sync::Arc;

use nport_filings::{EdgarClient, Result};

use crate::config::AppConfig;

/// Shared, read-only state built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub edgar: Arc<EdgarClient>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let edgar = EdgarClient::new(config.edgar_config())?;
        Ok(Self::from_parts(config, edgar))
    }

    pub fn from_parts(config: AppConfig, edgar: EdgarClient) -> Self {
        Self {
            edgar: Arc::new(edgar),
            config: Arc::new(config),
        }
    }
}
