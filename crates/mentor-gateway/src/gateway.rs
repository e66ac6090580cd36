use mentor_types::{ChatAnswer, ChatRequest, MentorError};

use crate::{build_payload, reduce, AdapterRegistry, AdapterSpec, FallbackPolicy};

// ---------------------------------------------------------------------------
// ModelGateway
// ---------------------------------------------------------------------------

/// Translates a `(prompt, model)` pair into exactly one outbound HTTP call
/// and reduces the reply to a [`ChatAnswer`].
///
/// Stateless between calls: concurrent invocations share only the reqwest
/// client's connection pool. No retries, no timeout beyond the transport
/// default — the first result is final.
pub struct ModelGateway {
    client: reqwest::Client,
    registry: AdapterRegistry,
    token: Option<String>,
    fallback: FallbackPolicy,
}

impl ModelGateway {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            client: reqwest::Client::new(),
            registry,
            token: None,
            fallback: FallbackPolicy::default(),
        }
    }

    /// Builds the gateway against the hosted registry, picking up the bearer
    /// credential from `HF_TOKEN` when present. Public endpoints work
    /// without one.
    pub fn from_env() -> Self {
        let token = std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty());
        Self::new(AdapterRegistry::hosted()).with_token(token)
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = policy;
        self
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// The sole entry point. Total: every transport, HTTP, and decode
    /// failure is absorbed into an error-flagged answer, never propagated.
    pub async fn query(&self, request: &ChatRequest) -> ChatAnswer {
        match self.dispatch(request).await {
            Ok(text) => ChatAnswer::ok(text),
            Err(err) => {
                tracing::warn!(model = %request.model, error = %err, "gateway call failed");
                ChatAnswer::error(&err)
            }
        }
    }

    async fn dispatch(&self, request: &ChatRequest) -> Result<String, MentorError> {
        let (spec, endpoint) = self.resolve(&request.model)?;
        let payload = build_payload(spec.payload_shape, &request.prompt);

        tracing::debug!(
            %endpoint,
            payload_shape = ?spec.payload_shape,
            response_shape = ?spec.response_shape,
            "dispatching chat request"
        );

        let mut outbound = self.client.post(&endpoint).json(&payload);
        if let Some(token) = &self.token {
            outbound = outbound.bearer_auth(token);
        }

        let response = outbound.send().await.map_err(|e| MentorError::Transport {
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| MentorError::Transport {
            message: e.to_string(),
        })?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "backend replied");

        if !status.is_success() {
            return Err(MentorError::BackendHttp {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: serde_json::Value = serde_json::from_str(&body)?;
        Ok(reduce(&decoded, &body))
    }

    /// Selection policy: alias match first, otherwise the configured
    /// fallback (literal model path through the default adapter, or deny).
    fn resolve(&self, model: &str) -> Result<(&AdapterSpec, String), MentorError> {
        if let Some(spec) = self.registry.lookup(model) {
            return Ok((spec, spec.endpoint_for(model)));
        }
        match self.fallback {
            FallbackPolicy::LiteralModel => {
                let spec = self.registry.default_adapter();
                Ok((spec, spec.endpoint_for(model)))
            }
            FallbackPolicy::Deny => Err(MentorError::UnknownModel {
                model: model.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
