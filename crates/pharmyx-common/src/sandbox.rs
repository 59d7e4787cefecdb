use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::error::PharmyxError;

/// NCBI E-utilities host; the only domain Pharmyx needs by default.
pub const EUTILS_HOST: &str = "eutils.ncbi.nlm.nih.gov";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An HTTP client that only issues requests to allowlisted domains.
///
/// Wraps a `reqwest::Client` built with a fixed request timeout. Every request
/// builder is obtained through [`SandboxClient::get`] so a misconfigured URL
/// can never leave the allowlist.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client allowing only the NCBI E-utilities host, with the default timeout.
    pub fn new() -> Result<Self, PharmyxError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, PharmyxError> {
        let mut allowlist = HashSet::new();
        allowlist.insert(EUTILS_HOST.to_string());

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("pharmyx/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PharmyxError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        // Exact match or a subdomain of an allowed domain
        self.allowlist
            .iter()
            .any(|allowed| host == allowed || host.ends_with(&format!(".{}", allowed)))
    }

    /// Returns a GET request builder for an allowlisted URL.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, PharmyxError> {
        if !self.is_allowed(url) {
            warn!(url, "Blocked request to non-allowlisted domain");
            return Err(PharmyxError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
