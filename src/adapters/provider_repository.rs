use crate::domain::model::Provider;
use crate::domain::outcome::Outcome;
use crate::domain::ports::{CancelSignal, ProviderRepository, Storage};
use crate::utils::cancellation::run_cancellable;
use crate::utils::error::{BundlerError, Result};
use async_trait::async_trait;
use serde::Deserialize;

pub const TOPIC_SEPARATOR: char = '+';

/// On-disk catalog: provider name -> `+`-separated topics.
#[derive(Debug, Deserialize)]
struct ProviderTopicsModel {
    provider_topics: serde_json::Map<String, serde_json::Value>,
}

impl ProviderTopicsModel {
    fn into_providers(self) -> Result<Vec<Provider>> {
        self.provider_topics
            .into_iter()
            .map(|(name, topics)| match topics {
                serde_json::Value::String(topics) => Ok(parse_provider(name, &topics)),
                other => Err(BundlerError::repository(format!(
                    "Topics of provider '{}' must be a string, got {}",
                    name, other
                ))),
            })
            .collect()
    }
}

fn parse_provider(name: String, topics: &str) -> Provider {
    Provider::new(
        name,
        topics
            .split(TOPIC_SEPARATOR)
            .filter(|topic| !topic.is_empty()),
    )
}

/// Loads the provider catalog from a JSON document through a [`Storage`].
pub struct JsonProviderRepository<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> JsonProviderRepository<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Provider>> {
        if !self.storage.exists(&self.path).await {
            return Err(BundlerError::repository(format!(
                "JSON file not found. Path: {}",
                self.path
            )));
        }

        let bytes = self.storage.read_file(&self.path).await?;
        let model: Option<ProviderTopicsModel> = serde_json::from_slice(&bytes)?;

        let Some(model) = model else {
            return Err(BundlerError::repository(format!(
                "JSON file is null. Path: {}",
                self.path
            )));
        };

        model.into_providers()
    }
}

#[async_trait]
impl<S: Storage> ProviderRepository for JsonProviderRepository<S> {
    async fn get_all(&self, cancel: &CancelSignal) -> Outcome<Vec<Provider>> {
        tracing::debug!("Loading providers from {}", self.path);

        let result = run_cancellable(cancel, self.load()).await;
        match &result {
            Ok(providers) => tracing::info!("Loaded {} providers", providers.len()),
            Err(e) => tracing::warn!("Failed to load providers from {}: {}", self.path, e),
        }

        result.into()
    }
}
