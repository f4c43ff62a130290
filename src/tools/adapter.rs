//! Generic lookup tool built from a per-service adapter
//!
//! Every lookup follows the same pipeline: validate input, build one URL,
//! perform one GET, classify the status, normalize the body. A
//! [`LookupAdapter`] supplies the service-specific pieces and
//! [`LookupTool`] runs the pipeline.

use crate::tools::shape::InputShape;
use crate::tools::upstream::{classify, Disposition, Upstream, UpstreamClient};
use crate::tools::{Tool, ToolDescription, ToolError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Request facts available to a normalizer
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// Base URL the request was built from
    pub base_url: &'a str,
    /// Exact URL queried
    pub url: &'a str,
}

/// Service-specific half of a lookup tool
pub trait LookupAdapter: Send + Sync {
    type Args: DeserializeOwned + Send + Sync;
    type Output: Serialize;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const SHAPE: InputShape;
    const UPSTREAM: Upstream;

    fn request_url(&self, base_url: &str, args: &Self::Args) -> String;

    fn not_found_message(&self, args: &Self::Args) -> String;

    /// Extra context appended to upstream status errors
    fn upstream_error_detail(&self, _args: &Self::Args, _status: u16) -> Option<String> {
        None
    }

    fn normalize(
        &self,
        args: &Self::Args,
        ctx: RequestContext<'_>,
        body: &Value,
    ) -> Result<Self::Output, ToolError>;
}

/// Tool facade over a [`LookupAdapter`]
pub struct LookupTool<A: LookupAdapter> {
    adapter: A,
    client: Option<UpstreamClient>,
}

impl<A: LookupAdapter> LookupTool<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            client: None,
        }
    }

    /// Extract `base_url` from the tool's config table (pure function)
    fn base_url_override(config: Option<&Value>) -> Result<Option<&str>, ToolError> {
        let Some(config) = config else {
            return Ok(None);
        };
        if let Some(unknown) = config
            .as_object()
            .and_then(|table| table.keys().find(|key| key.as_str() != "base_url"))
        {
            return Err(ToolError::InitializationError(format!(
                "unknown config key '{unknown}' for {}",
                A::NAME
            )));
        }
        match config.get("base_url") {
            None => Ok(None),
            Some(Value::String(url)) => Ok(Some(url.as_str())),
            Some(_) => Err(ToolError::InitializationError(format!(
                "base_url for {} must be a string",
                A::NAME
            ))),
        }
    }
}

#[async_trait]
impl<A> Tool for LookupTool<A>
where
    A: LookupAdapter + 'static,
{
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: A::NAME.to_string(),
            description: A::DESCRIPTION.to_string(),
            parameters: A::SHAPE.to_json_schema(),
        }
    }

    async fn initialize(&mut self, config: Option<&Value>) -> Result<(), ToolError> {
        A::SHAPE.check_patterns()?;
        let base_url = Self::base_url_override(config)?;
        self.client = Some(UpstreamClient::new(A::UPSTREAM, base_url)?);
        Ok(())
    }

    async fn execute(&self, parameters: &Value) -> Result<String, ToolError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ToolError::NotInitialized(A::NAME.to_string()))?;

        let args: A::Args = A::SHAPE.validate(parameters)?.into_args()?;
        let url = self.adapter.request_url(client.base_url(), &args);

        debug!(tool = A::NAME, %url, "Calling upstream");
        let outcome = client.get(&url).await?;

        let disposition = classify(outcome, A::UPSTREAM.label, || {
            self.adapter.not_found_message(&args)
        })
        .map_err(|e| {
            let e = match e {
                ToolError::Upstream {
                    service,
                    status,
                    detail: None,
                    body,
                } => ToolError::Upstream {
                    detail: self.adapter.upstream_error_detail(&args, status),
                    service,
                    status,
                    body,
                },
                other => other,
            };
            warn!(tool = A::NAME, %url, "Upstream call failed: {e}");
            e
        })?;

        match disposition {
            Disposition::NotFound(message) => {
                info!(tool = A::NAME, %url, "Upstream has no such entity");
                Ok(message)
            }
            Disposition::Found(body) => {
                let ctx = RequestContext {
                    base_url: client.base_url(),
                    url: &url,
                };
                let summary = self.adapter.normalize(&args, ctx, &body)?;
                serde_json::to_string(&summary)
                    .map_err(|e| ToolError::ExecutionError(format!("serializing result: {e}")))
            }
        }
    }

    async fn shutdown(&mut self) -> Result<(), ToolError> {
        self.client = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::pokemon::PokemonAdapter;
    use serde_json::json;

    #[test]
    fn test_base_url_override_parsing() {
        type T = LookupTool<PokemonAdapter>;
        assert_eq!(T::base_url_override(None).unwrap(), None);
        assert_eq!(
            T::base_url_override(Some(&json!({"base_url": "http://localhost:1"}))).unwrap(),
            Some("http://localhost:1")
        );
        assert!(T::base_url_override(Some(&json!({"base_url": 5}))).is_err());
        assert!(T::base_url_override(Some(&json!({"timeout": 5}))).is_err());
    }

    #[tokio::test]
    async fn test_execute_before_initialize_fails() {
        let tool = LookupTool::new(PokemonAdapter);
        let result = tool.execute(&json!({"nameOrId": "pikachu"})).await;
        assert!(matches!(result, Err(ToolError::NotInitialized(_))));
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_network() {
        let mut tool = LookupTool::new(PokemonAdapter);
        // Unroutable base: any request attempt would surface as a transport error
        tool.initialize(Some(&json!({"base_url": "http://127.0.0.1:9"})))
            .await
            .unwrap();

        let result = tool
            .execute(&json!({"nameOrId": "pikachu", "moves_limit": 99}))
            .await;
        assert!(matches!(result, Err(ToolError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shutdown_drops_client() {
        let mut tool = LookupTool::new(PokemonAdapter);
        tool.initialize(None).await.unwrap();
        tool.shutdown().await.unwrap();
        let result = tool.execute(&json!({"nameOrId": "pikachu"})).await;
        assert!(matches!(result, Err(ToolError::NotInitialized(_))));
    }
}
