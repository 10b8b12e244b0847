//! Client configuration types.

use req_core::{ReqError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Web service endpoint of the anonymous enterprise search
pub const DEFAULT_BASE_URL: &str = "https://www.registreentreprises.gouv.qc.ca/RQAnonymeGR/GR/GR03/GR03A2_20A_PIU_RechEntMob_PC/ServiceCommunicationInterne.asmx";

/// Origin of the service's web front-end
pub const DEFAULT_ORIGIN: &str = "https://www.registreentreprises.gouv.qc.ca";

/// Page of the web front-end that issues the service calls
pub const DEFAULT_REFERER: &str = "https://www.registreentreprises.gouv.qc.ca/RQAnonymeGR/GR/GR03/GR03A2_20A_PIU_RechEntMob_PC/index.html";

/// Accept-Language sent with every request
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,fr;q=0.8";

/// Client configuration, loadable from a TOML file.
///
/// No timeout is applied unless `timeout_secs` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service base URL; operation paths are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `Origin` header value
    #[serde(default = "default_origin")]
    pub origin: String,

    /// `Referer` header value
    #[serde(default = "default_referer")]
    pub referer: String,

    /// `Accept-Language` header value
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// `User-Agent` header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds (disabled when absent)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
            referer: default_referer(),
            accept_language: default_accept_language(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load config from a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ReqError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReqError::Config(e.to_string()))
    }

    /// The configured timeout, if any
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// Default value functions for serde.
fn default_base_url() -> String {
    String::from(DEFAULT_BASE_URL)
}

fn default_origin() -> String {
    String::from(DEFAULT_ORIGIN)
}

fn default_referer() -> String {
    String::from(DEFAULT_REFERER)
}

fn default_accept_language() -> String {
    String::from(DEFAULT_ACCEPT_LANGUAGE)
}

fn default_user_agent() -> String {
    format!("req-rust/{}", env!("CARGO_PKG_VERSION"))
}
