//! Off-chain agent cards.
//!
//! The identity record only stores a URI; the card behind it is advisory.
//! Every failure here collapses to "no card" at the client level.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::errors::{IdentityError, IdentityResult};

/// An agent card as published. Any JSON document is a valid card; the
/// accessors below read well-known fields and ignore values of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentCard {
    raw: Value,
}

impl AgentCard {
    pub fn from_json(raw: Value) -> Self {
        Self { raw }
    }

    pub fn as_json(&self) -> &Value {
        &self.raw
    }

    pub fn into_json(self) -> Value {
        self.raw
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    pub fn image(&self) -> Option<&str> {
        self.str_field("image")
    }

    pub fn website(&self) -> Option<&str> {
        self.str_field("website")
    }

    pub fn twitter(&self) -> Option<&str> {
        self.str_field("twitter")
    }

    pub fn github(&self) -> Option<&str> {
        self.str_field("github")
    }

    /// `capabilities` as a list of strings; a single string counts as one entry.
    pub fn capabilities(&self) -> Vec<&str> {
        match self.raw.get("capabilities") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(one)) => vec![one.as_str()],
            _ => Vec::new(),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }
}

/// Rewrite `uri` so bare hosts listed in `www_hosts` gain a `www.` prefix.
///
/// Non-http(s) or unparsable URIs are returned unchanged.
pub fn normalize_metadata_url(uri: &str, www_hosts: &[String]) -> String {
    let Ok(mut url) = Url::parse(uri.trim()) else {
        return uri.to_string();
    };
    if !matches!(url.scheme(), "http" | "https") {
        return uri.to_string();
    }
    let Some(host) = url.host_str().map(|h| h.to_ascii_lowercase()) else {
        return uri.to_string();
    };
    if www_hosts.iter().any(|h| h == &host) {
        let rewritten = format!("www.{host}");
        if url.set_host(Some(&rewritten)).is_ok() {
            return url.to_string();
        }
    }
    uri.to_string()
}

/// Source of agent cards.
#[async_trait]
pub trait CardFetcher: Send + Sync {
    async fn fetch_card(&self, uri: &str) -> IdentityResult<AgentCard>;
}

/// HTTP card fetcher backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpCardFetcher {
    http: reqwest::Client,
    www_hosts: Vec<String>,
}

impl HttpCardFetcher {
    pub fn new(timeout_ms: u64, www_hosts: Vec<String>) -> IdentityResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| IdentityError::config(format!("http client: {e}")))?;
        Ok(Self { http, www_hosts })
    }
}

#[async_trait]
impl CardFetcher for HttpCardFetcher {
    async fn fetch_card(&self, uri: &str) -> IdentityResult<AgentCard> {
        let url = normalize_metadata_url(uri, &self.www_hosts);
        tracing::debug!(%url, "fetching agent card");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| IdentityError::MetadataUnavailable(format!("fetch {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(IdentityError::MetadataUnavailable(format!("http error: {status}")));
        }
        let value = resp
            .json::<Value>()
            .await
            .map_err(|e| IdentityError::MetadataUnavailable(format!("invalid json: {e}")))?;
        Ok(AgentCard::from_json(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_listed_host_gets_www() {
        let hosts = vec!["example.com".to_string()];
        assert_eq!(
            normalize_metadata_url("https://example.com/agents/a.json", &hosts),
            "https://www.example.com/agents/a.json"
        );
    }

    #[test]
    fn other_hosts_untouched() {
        let hosts = vec!["example.com".to_string()];
        for uri in [
            "https://www.example.com/a.json",
            "https://cdn.example.org/a.json",
            "ipfs://bafy/a.json",
            "not a url",
        ] {
            assert_eq!(normalize_metadata_url(uri, &hosts), uri);
        }
    }

    #[test]
    fn host_match_ignores_case() {
        let hosts = vec!["example.com".to_string()];
        assert_eq!(
            normalize_metadata_url("https://Example.com/x", &hosts),
            "https://www.example.com/x"
        );
    }

    #[test]
    fn card_reads_well_known_fields() {
        let card = AgentCard::from_json(json!({
            "name": "scout",
            "capabilities": ["trade", 7, "chat"],
            "version": 3
        }));
        assert_eq!(card.name(), Some("scout"));
        assert_eq!(card.capabilities(), vec!["trade", "chat"]);
        assert_eq!(card.as_json()["version"], json!(3));
    }

    #[test]
    fn any_json_is_a_card() {
        let odd = [
            json!({"name": 5}),
            json!({"capabilities": "chat"}),
            json!({"twitter": {"handle": "x"}}),
            json!([1, 2]),
            json!("just a string"),
        ];
        for value in odd {
            let card = AgentCard::from_json(value.clone());
            assert_eq!(card.as_json(), &value);
            assert_eq!(serde_json::to_value(&card).unwrap(), value);
        }

        assert_eq!(AgentCard::from_json(json!({"name": 5})).name(), None);
        assert_eq!(AgentCard::from_json(json!({"capabilities": "chat"})).capabilities(), vec!["chat"]);
        assert_eq!(AgentCard::from_json(json!({"twitter": {"handle": "x"}})).twitter(), None);
    }
}
