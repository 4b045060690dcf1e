//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::listing::config::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub secret: String,
    /// Rows per page on every listing screen.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_size_falls_back_to_default() {
        let config: ServerConfig = serde_json::from_value(json!({
            "domain": "example.com",
            "address": "0.0.0.0",
            "port": 8080,
            "database_url": "app.db",
            "secret": "secret"
        }))
        .unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        let config: ServerConfig = serde_json::from_value(json!({
            "domain": "example.com",
            "address": "0.0.0.0",
            "port": 8080,
            "database_url": "app.db",
            "secret": "secret",
            "page_size": 25
        }))
        .unwrap();
        assert_eq!(config.page_size, 25);
    }
}
