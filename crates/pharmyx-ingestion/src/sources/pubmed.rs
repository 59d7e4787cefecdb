//! PubMed E-utilities client.
//!
//! Endpoints used:
//!   esearch: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi
//!   efetch:  https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi
//!
//! NCBI asks every client to identify itself with `tool` and `email`
//! parameters; both come from [`PubMedConfig`].

use std::time::Duration;

use async_trait::async_trait;
use pharmyx_common::{PharmyxError, SandboxClient as Client};
use tracing::{debug, instrument};

use crate::medline::parse_medline;
use crate::models::RawRecord;
use super::LiteratureSource;

const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const EFETCH_URL:  &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Identification and limits sent with every E-utilities request.
#[derive(Debug, Clone)]
pub struct PubMedConfig {
    pub contact_email: String,
    pub tool: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            contact_email: "your_email@example.com".to_string(),
            tool: "pharmyx".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

pub struct PubMedClient {
    client: Client,
    config: PubMedConfig,
}

impl PubMedClient {
    pub fn new(config: PubMedConfig) -> Result<Self, PharmyxError> {
        let client = Client::with_timeout(Duration::from_secs(config.timeout_secs))?;
        Ok(Self { client, config })
    }

    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("tool", self.config.tool.clone()),
            ("email", self.config.contact_email.clone()),
        ];
        if let Some(key) = self.config.api_key.as_ref().filter(|k| !k.is_empty()) {
            params.push(("api_key", key.clone()));
        }
        params
    }

    /// Search PubMed and return a list of PMIDs.
    #[instrument(skip(self))]
    async fn esearch(&self, query: &str, max: usize) -> anyhow::Result<Vec<String>> {
        let mut params = self.base_params();
        params.push(("term", query.to_string()));
        params.push(("retmax", max.to_string()));
        params.push(("retmode", "json".to_string()));
        params.push(("usehistory", "n".to_string()));

        let resp: serde_json::Value = self.client
            .get(ESEARCH_URL)?
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ids = parse_esearch_ids(&resp)?;
        debug!(count = ids.len(), "PubMed esearch returned PMIDs");
        Ok(ids)
    }

    /// Fetch MEDLINE text for a list of PMIDs and parse it into raw records.
    #[instrument(skip(self, pmids), fields(n = pmids.len()))]
    async fn efetch_medline(&self, pmids: &[String]) -> anyhow::Result<Vec<RawRecord>> {
        if pmids.is_empty() {
            return Ok(vec![]);
        }

        let mut params = self.base_params();
        params.push(("id", pmids.join(",")));
        params.push(("rettype", "medline".to_string()));
        params.push(("retmode", "text".to_string()));

        let text = self.client
            .get(EFETCH_URL)?
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let records = parse_medline(&text)?;
        debug!(count = records.len(), "PubMed efetch returned records");
        Ok(records)
    }
}

#[async_trait]
impl LiteratureSource for PubMedClient {
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<String>> {
        self.esearch(query, max_results).await
    }

    async fn fetch_records(&self, ids: &[String]) -> anyhow::Result<Vec<RawRecord>> {
        self.efetch_medline(ids).await
    }
}

/// Pull the PMID list out of an esearch JSON response.
///
/// An `ERROR` field in the payload (e.g. a malformed query) is a service error;
/// a missing or empty `idlist` is simply zero results.
fn parse_esearch_ids(resp: &serde_json::Value) -> Result<Vec<String>, PharmyxError> {
    if let Some(err) = resp["error"].as_str().or_else(|| resp["esearchresult"]["ERROR"].as_str()) {
        return Err(PharmyxError::Service(format!("esearch failed: {}", err)));
    }

    let ids = resp["esearchresult"]["idlist"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_esearch_ids() {
        let resp = json!({
            "header": {"type": "esearch", "version": "0.3"},
            "esearchresult": {
                "count": "3",
                "retmax": "3",
                "idlist": ["38000001", "38000002", "38000003"]
            }
        });
        let ids = parse_esearch_ids(&resp).unwrap();
        assert_eq!(ids, vec!["38000001", "38000002", "38000003"]);
    }

    #[test]
    fn test_parse_esearch_no_results() {
        let resp = json!({
            "esearchresult": {
                "count": "0",
                "idlist": [],
                "warninglist": {"outputmessages": ["No items found."]}
            }
        });
        assert!(parse_esearch_ids(&resp).unwrap().is_empty());
    }

    #[test]
    fn test_parse_esearch_error_payload() {
        let resp = json!({ "error": "API rate limit exceeded", "count": "11" });
        let err = parse_esearch_ids(&resp).unwrap_err();
        assert!(err.to_string().contains("API rate limit exceeded"));
    }

    #[test]
    fn test_base_params_carry_contact_and_key() {
        let client = PubMedClient::new(PubMedConfig {
            contact_email: "me@lab.org".to_string(),
            api_key: Some("abc123".to_string()),
            ..Default::default()
        })
        .unwrap();
        let params = client.base_params();
        assert!(params.contains(&("email", "me@lab.org".to_string())));
        assert!(params.contains(&("tool", "pharmyx".to_string())));
        assert!(params.contains(&("api_key", "abc123".to_string())));
    }

    #[test]
    fn test_blank_api_key_is_omitted() {
        let client = PubMedClient::new(PubMedConfig {
            api_key: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert!(client.base_params().iter().all(|(k, _)| *k != "api_key"));
    }

    #[tokio::test]
    async fn test_fetch_with_no_ids_skips_request() {
        let client = PubMedClient::new(PubMedConfig::default()).unwrap();
        let records = client.fetch_records(&[]).await.unwrap();
        assert!(records.is_empty());
    }
}
