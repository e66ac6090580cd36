use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PayloadShape / ResponseShape
// ---------------------------------------------------------------------------

/// How a backend expects the outbound request body to be shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// Ordered role/content pairs: one system message (mentor persona) and
    /// one user message carrying the prompt.
    ChatMessages,
    /// A single text field with explicit user/assistant turn markers, for
    /// instruct-tuned backends without a chat schema.
    PlainInstructText,
}

/// The reply shape a backend is expected to produce.
///
/// This is a hint only. Backends are inconsistent, so reduction always runs
/// the full priority ladder regardless of the declared shape (see
/// [`crate::reduce`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    ListOfGeneratedText,
    ListOfChatMessages,
    DictGeneratedText,
}

// ---------------------------------------------------------------------------
// AdapterSpec
// ---------------------------------------------------------------------------

/// One backend family's conventions: where to POST and how to shape the
/// payload. Immutable once built.
#[derive(Debug, Clone)]
pub struct AdapterSpec {
    /// Endpoint URL, with an optional `{model}` placeholder substituted at
    /// call time.
    pub endpoint_template: String,
    pub payload_shape: PayloadShape,
    pub response_shape: ResponseShape,
}

impl AdapterSpec {
    pub fn new(
        endpoint_template: impl Into<String>,
        payload_shape: PayloadShape,
        response_shape: ResponseShape,
    ) -> Self {
        Self {
            endpoint_template: endpoint_template.into(),
            payload_shape,
            response_shape,
        }
    }

    /// Resolves the endpoint for a concrete model name.
    pub fn endpoint_for(&self, model: &str) -> String {
        self.endpoint_template.replace("{model}", model)
    }
}

// ---------------------------------------------------------------------------
// FallbackPolicy
// ---------------------------------------------------------------------------

/// What to do with a model name that matches no registered alias.
///
/// The default policy treats the name as a literal backend model path and
/// routes it through the registry's default adapter. `Deny` turns the same
/// input into an `UnknownModel` error answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    #[default]
    LiteralModel,
    Deny,
}

// ---------------------------------------------------------------------------
// AdapterRegistry
// ---------------------------------------------------------------------------

/// Case-insensitive alias map plus the default adapter used for
/// fully-qualified model paths.
pub struct AdapterRegistry {
    aliases: HashMap<String, AdapterSpec>,
    default_adapter: AdapterSpec,
}

impl AdapterRegistry {
    pub fn new(default_adapter: AdapterSpec) -> Self {
        Self {
            aliases: HashMap::new(),
            default_adapter,
        }
    }

    /// The built-in registry: short aliases for the two hosted mentor models
    /// plus a literal-path default against the Hugging Face inference API.
    pub fn hosted() -> Self {
        let mut registry = Self::new(AdapterSpec::new(
            "https://api-inference.huggingface.co/models/{model}",
            PayloadShape::ChatMessages,
            ResponseShape::ListOfChatMessages,
        ));
        registry.insert(
            "zephyr",
            AdapterSpec::new(
                "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-beta",
                PayloadShape::PlainInstructText,
                ResponseShape::ListOfGeneratedText,
            ),
        );
        registry.insert(
            "mistral",
            AdapterSpec::new(
                "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2",
                PayloadShape::PlainInstructText,
                ResponseShape::ListOfGeneratedText,
            ),
        );
        registry
    }

    pub fn insert(&mut self, alias: impl Into<String>, spec: AdapterSpec) {
        self.aliases.insert(alias.into().to_lowercase(), spec);
    }

    /// Alias lookup, case-insensitive. `None` means the caller should apply
    /// its fallback policy.
    pub fn lookup(&self, model: &str) -> Option<&AdapterSpec> {
        self.aliases.get(&model.to_lowercase())
    }

    pub fn default_adapter(&self) -> &AdapterSpec {
        &self.default_adapter
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::hosted()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
