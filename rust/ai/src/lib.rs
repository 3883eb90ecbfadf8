//! # tablemind-ai: Decision Providers for Blackjack Seats
//!
//! Implementations of the engine's [`DecisionProvider`] trait, plus a
//! factory that builds one from a short textual spec.
//!
//! ## Core Components
//!
//! - [`baseline`] - Deterministic basic-strategy player
//! - [`model`] - Chat-completion model provider
//! - [`client`] - HTTP transport for OpenAI-compatible endpoints
//! - [`create_provider`] - Factory keyed by [`ProviderSpec`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tablemind_ai::{create_provider, ModelSettings, ProviderSpec};
//! use tablemind_engine::provider::DecisionProvider;
//! use tablemind_engine::usage::UsageTracker;
//!
//! let spec = ProviderSpec::parse("basic").unwrap();
//! let provider = create_provider(&spec, &ModelSettings::default(), Arc::new(UsageTracker::new()))
//!     .unwrap()
//!     .expect("basic strategy is a real provider");
//! assert_eq!(provider.id(), "basic");
//! ```
//!
//! ## Provider Kinds
//!
//! - `"house"` - no provider; the engine's built-in policy plays the seat
//! - `"basic"` - [`baseline::BasicStrategy`]
//! - `"model:<model-id>"` - [`model::ModelProvider`] over [`client::OpenAiCompatClient`]

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tablemind_engine::provider::DecisionProvider;
use tablemind_engine::usage::UsageTracker;
use thiserror::Error;

pub mod baseline;
pub mod client;
pub mod model;
pub mod parse;
pub mod prompt;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1";

/// Upper bound on one chat-completion request, connect through body.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unknown provider kind: {0} (expected house, basic, or model:<id>)")]
    UnknownKind(String),
    #[error("Model provider needs a model id, e.g. model:openai/gpt-4o-mini")]
    MissingModelId,
    #[error("Model provider {0} needs an API key")]
    MissingApiKey(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] client::ChatError),
}

/// What drives a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSpec {
    House,
    Basic,
    Model(String),
}

impl ProviderSpec {
    pub fn parse(s: &str) -> Result<Self, ProviderError> {
        let s = s.trim();
        if let Some(id) = s.strip_prefix("model:") {
            let id = id.trim();
            if id.is_empty() {
                return Err(ProviderError::MissingModelId);
            }
            return Ok(ProviderSpec::Model(id.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "house" | "" => Ok(ProviderSpec::House),
            "basic" => Ok(ProviderSpec::Basic),
            "model" => Err(ProviderError::MissingModelId),
            _ => Err(ProviderError::UnknownKind(s.to_string())),
        }
    }
}

impl FromStr for ProviderSpec {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSpec::House => write!(f, "house"),
            ProviderSpec::Basic => write!(f, "basic"),
            ProviderSpec::Model(id) => write!(f, "model:{}", id),
        }
    }
}

/// Connection settings shared by every model-backed seat.
#[derive(Clone)]
pub struct ModelSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Builds the provider for `spec`. `Ok(None)` means the seat is played by
/// the engine's own policy.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tablemind_ai::{create_provider, ModelSettings, ProviderError, ProviderSpec};
/// use tablemind_engine::usage::UsageTracker;
///
/// let usage = Arc::new(UsageTracker::new());
/// let house = create_provider(&ProviderSpec::House, &ModelSettings::default(), usage.clone());
/// assert!(house.unwrap().is_none());
///
/// let model = ProviderSpec::Model("openai/gpt-4o-mini".into());
/// let err = create_provider(&model, &ModelSettings::default(), usage).err();
/// assert!(matches!(err, Some(ProviderError::MissingApiKey(_))));
/// ```
pub fn create_provider(
    spec: &ProviderSpec,
    settings: &ModelSettings,
    usage: Arc<UsageTracker>,
) -> Result<Option<Box<dyn DecisionProvider>>, ProviderError> {
    match spec {
        ProviderSpec::House => Ok(None),
        ProviderSpec::Basic => Ok(Some(Box::new(baseline::BasicStrategy::new()))),
        ProviderSpec::Model(id) => {
            let key = settings
                .api_key
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| ProviderError::MissingApiKey(id.clone()))?;
            let client = client::OpenAiCompatClient::new(
                &settings.endpoint,
                key,
                id.clone(),
                settings.request_timeout,
            )?;
            tracing::debug!(model = %id, endpoint = %settings.endpoint, "model provider created");
            Ok(Some(Box::new(model::ModelProvider::new(
                id.clone(),
                Box::new(client),
                usage,
            ))))
        }
    }
}
