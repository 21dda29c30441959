//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_proposals_per_page() -> usize {
    20
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Directory where uploaded content files are kept.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Page size of the proposal listing.
    #[serde(default = "default_proposals_per_page")]
    pub proposals_per_page: usize,
}
