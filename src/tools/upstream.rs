//! Upstream request building, transport and status classification
//!
//! Shared by every lookup tool. URL construction and classification are pure
//! functions; [`UpstreamClient::get`] is the single I/O step per invocation.

use crate::tools::ToolError;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;
use url::Url;

pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Fixed facts about one upstream service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upstream {
    /// Service name used in error messages
    pub label: &'static str,
    pub default_base_url: &'static str,
    /// Identifying `User-Agent` sent on every request
    pub user_agent: &'static str,
}

pub const POKEAPI: Upstream = Upstream {
    label: "PokéAPI",
    default_base_url: POKEAPI_BASE_URL,
    user_agent: "mcp-pokemon/1.0",
};

pub const BINANCE: Upstream = Upstream {
    label: "Binance API",
    default_base_url: BINANCE_BASE_URL,
    user_agent: "mcp-binance/1.0",
};

/// `{base}/{resource}/{id}` with the id trimmed, lower-cased and percent-encoded
pub fn resource_url(base_url: &str, resource: &str, name_or_id: &str) -> String {
    format!(
        "{}/{resource}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&name_or_id.trim().to_lowercase())
    )
}

/// Reason phrase for a status code, e.g. "Bad Request" for 400
pub fn reason_phrase(status: u16) -> Option<&'static str> {
    StatusCode::from_u16(status).ok()?.canonical_reason()
}

/// `{base}/api/v3/ticker/price?symbol={SYMBOL}`
pub fn ticker_price_url(base_url: &str, symbol: &str) -> String {
    format!(
        "{}/api/v3/ticker/price?symbol={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&symbol.to_uppercase())
    )
}

/// Check that a base URL override is an absolute http(s) URL
pub fn parse_base_url(raw: &str) -> Result<String, String> {
    let parsed = Url::parse(raw).map_err(|e| format!("invalid base URL '{raw}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(format!(
            "invalid base URL '{raw}': unsupported scheme '{other}'"
        )),
    }
}

/// Raw outcome of one upstream call
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome {
    NotFound,
    UpstreamError { status: u16, body: String },
    Success { status: u16, body: Value },
}

impl UpstreamOutcome {
    /// Classify a status and body text without interpreting the body's meaning
    pub fn from_response(status: u16, body: String, service: &str) -> Result<Self, ToolError> {
        if status == StatusCode::NOT_FOUND.as_u16() {
            return Ok(UpstreamOutcome::NotFound);
        }
        if !(200..300).contains(&status) {
            return Ok(UpstreamOutcome::UpstreamError { status, body });
        }
        match serde_json::from_str(&body) {
            Ok(json) => Ok(UpstreamOutcome::Success { status, body: json }),
            Err(e) => Err(ToolError::malformed(
                service,
                format!("response body is not valid JSON ({e})"),
                body,
            )),
        }
    }
}

/// What the tool does with a classified outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Benign "no such entity" message returned to the caller as a result
    NotFound(String),
    /// Body handed to the tool's normalizer
    Found(Value),
}

/// Map an outcome to a disposition or a fatal error
pub fn classify<F>(
    outcome: UpstreamOutcome,
    service: &str,
    not_found_message: F,
) -> Result<Disposition, ToolError>
where
    F: FnOnce() -> String,
{
    match outcome {
        UpstreamOutcome::NotFound => Ok(Disposition::NotFound(not_found_message())),
        UpstreamOutcome::UpstreamError { status, body } => Err(ToolError::Upstream {
            service: service.to_string(),
            status,
            detail: None,
            body,
        }),
        UpstreamOutcome::Success { body, .. } => Ok(Disposition::Found(body)),
    }
}

/// HTTP client bound to one upstream and base URL
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    upstream: Upstream,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client; `base_url` overrides the upstream's default endpoint
    pub fn new(upstream: Upstream, base_url: Option<&str>) -> Result<Self, ToolError> {
        let base_url = match base_url {
            Some(raw) => parse_base_url(raw).map_err(ToolError::InitializationError)?,
            None => upstream.default_base_url.to_string(),
        };

        let client = reqwest::Client::builder()
            .user_agent(upstream.user_agent)
            .build()
            .map_err(|e| ToolError::InitializationError(e.to_string()))?;

        Ok(Self {
            client,
            upstream,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upstream(&self) -> Upstream {
        self.upstream
    }

    /// Perform exactly one GET
    pub async fn get(&self, url: &str) -> Result<UpstreamOutcome, ToolError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ToolError::Transport(format!("GET {url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(UpstreamOutcome::NotFound);
        }

        let body = match response.text().await {
            Ok(text) => text,
            Err(e) if !status.is_success() => {
                warn!(%url, status = status.as_u16(), "Failed to read error body: {e}");
                String::new()
            }
            Err(e) => {
                return Err(ToolError::Transport(format!(
                    "reading response body from {url}: {e}"
                )))
            }
        };

        UpstreamOutcome::from_response(status.as_u16(), body, self.upstream.label)
    }
}
