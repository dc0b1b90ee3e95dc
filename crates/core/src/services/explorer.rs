use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::model::Network;

/// One `getsourcecode` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest<'a> {
    pub network: Network,
    pub address: &'a str,
    pub api_key: &'a str,
}

/// Verified source as returned by an explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSource {
    pub source: String,
    /// Bare version, e.g. `0.2.16` for `vyper:0.2.16`.
    pub compiler_version: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {code} from {url}: {body}")]
    Status { url: String, code: u16, body: String },
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Explorer rejected the request: {message} ({detail})")]
    Api { message: String, detail: String },
    #[error("Explorer returned no source entry for {0}")]
    EmptyResult(String),
    #[error("Failed to decode explorer response: {0}")]
    Decode(String),
}

/// Anything that can turn (network, address, key) into source text.
pub trait SourceFetcher {
    fn fetch(&self, request: &SourceRequest<'_>) -> Result<FetchedSource, FetchError>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: String,
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    #[serde(rename = "SourceCode", default)]
    source_code: String,
    #[serde(rename = "CompilerVersion", default)]
    compiler_version: String,
}

/// `vyper:0.2.16` -> `0.2.16`; strings without a prefix are returned as-is.
pub fn bare_compiler_version(raw: &str) -> &str {
    raw.rsplit(':').next().unwrap_or(raw).trim()
}

/// Decode a `getsourcecode` response body.
pub fn parse_source_response(address: &str, body: &str) -> Result<FetchedSource, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let entries = match envelope.result {
        serde_json::Value::Array(entries) => entries,
        serde_json::Value::String(detail) => {
            return Err(FetchError::Api { message: envelope.message, detail });
        }
        other => return Err(FetchError::Decode(format!("unexpected result: {other}"))),
    };

    let first = entries.into_iter().next().ok_or_else(|| FetchError::EmptyResult(address.into()))?;
    let entry: SourceEntry =
        serde_json::from_value(first).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(FetchedSource {
        compiler_version: bare_compiler_version(&entry.compiler_version).to_string(),
        source: entry.source_code,
    })
}

/// Blocking client for Etherscan-compatible explorer APIs.
pub struct ExplorerClient {
    agent: ureq::Agent,
    api_urls: BTreeMap<Network, String>,
}

impl ExplorerClient {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, api_urls: BTreeMap::new() }
    }

    /// Point `network` at a different API endpoint.
    pub fn with_api_url(mut self, network: Network, url: impl Into<String>) -> Self {
        self.api_urls.insert(network, url.into());
        self
    }

    pub fn api_url(&self, network: Network) -> &str {
        self.api_urls.get(&network).map(String::as_str).unwrap_or(network.default_api_url())
    }
}

impl SourceFetcher for ExplorerClient {
    fn fetch(&self, request: &SourceRequest<'_>) -> Result<FetchedSource, FetchError> {
        let url = self.api_url(request.network);
        let response = self
            .agent
            .get(url)
            .query("module", "contract")
            .query("action", "getsourcecode")
            .query("address", request.address)
            .query("apikey", request.api_key)
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, resp) => FetchError::Status {
                    url: url.to_string(),
                    code,
                    body: resp.into_string().unwrap_or_default(),
                },
                other => FetchError::Transport { url: url.to_string(), message: other.to_string() },
            })?;

        let body = response.into_string().map_err(|e| FetchError::Decode(e.to_string()))?;
        parse_source_response(request.address, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_source_entry() {
        let body = r#"{
            "status": "1",
            "message": "OK",
            "result": [{"SourceCode": "raw_call(a, b)", "CompilerVersion": "vyper:0.2.16"}]
        }"#;
        let fetched = parse_source_response("0xabc", body).unwrap();
        assert_eq!(fetched.source, "raw_call(a, b)");
        assert_eq!(fetched.compiler_version, "0.2.16");
    }

    #[test]
    fn string_result_is_an_api_error() {
        let body = r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#;
        match parse_source_response("0xabc", body).unwrap_err() {
            FetchError::Api { message, detail } => {
                assert_eq!(message, "NOTOK");
                assert_eq!(detail, "Invalid API Key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_result_names_address() {
        let body = r#"{"status":"1","message":"OK","result":[]}"#;
        let err = parse_source_response("0xabc", body).unwrap_err();
        assert!(matches!(err, FetchError::EmptyResult(ref a) if a == "0xabc"));
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        assert!(matches!(
            parse_source_response("0xabc", "<html>").unwrap_err(),
            FetchError::Decode(_)
        ));
    }

    #[test]
    fn version_prefix_is_stripped() {
        assert_eq!(bare_compiler_version("vyper:0.3.0"), "0.3.0");
        assert_eq!(bare_compiler_version("0.3.0"), "0.3.0");
    }

    #[test]
    fn api_url_override_wins() {
        let client = ExplorerClient::new(Duration::from_secs(1))
            .with_api_url(Network::Gnosis, "http://localhost:9/api");
        assert_eq!(client.api_url(Network::Gnosis), "http://localhost:9/api");
        assert_eq!(client.api_url(Network::Ftm), "https://api.ftmscan.com/api");
    }
}
