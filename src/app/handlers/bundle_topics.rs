use crate::core::{BundleCreator, CancelSignal, ProviderBundle, Storage, TopicWeights};
use crate::utils::cancellation::run_cancellable;
use crate::utils::error::{BundlerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Topic request document: `{"topics": {"<topic>": <weight>}}`.
///
/// Weights with more than 28 fractional digits are rounded to `Decimal` precision.
#[derive(Debug, Deserialize)]
struct RequestedTopicsModel {
    topics: TopicWeights,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub pretty: bool,
    pub output_path: Option<String>,
}

/// Rendered outcome of one bundling run.
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Provider name -> quote, in bundle order.
    pub quotes: serde_json::Map<String, serde_json::Value>,
    pub json: String,
    pub output_path: Option<String>,
}

pub struct BundleTopicsHandler<C: BundleCreator, S: Storage> {
    creator: C,
    storage: S,
    options: RenderOptions,
}

impl<C: BundleCreator, S: Storage> BundleTopicsHandler<C, S> {
    pub fn new(creator: C, storage: S, options: RenderOptions) -> Self {
        Self {
            creator,
            storage,
            options,
        }
    }

    pub async fn handle(&self, topics_path: &str, cancel: &CancelSignal) -> Result<BundleReport> {
        let requested_topics = run_cancellable(cancel, self.read_requested_topics(topics_path)).await?;
        tracing::debug!("Requested {} topics", requested_topics.len());

        let bundle = self
            .creator
            .create_bundle(&requested_topics, cancel)
            .await
            .into_result()?;

        let quotes = render_bundle(&bundle)?;
        let json = if self.options.pretty {
            serde_json::to_string_pretty(&quotes)?
        } else {
            serde_json::to_string(&quotes)?
        };

        tracing::info!("Bundling result: \n{}", json);

        if let Some(output_path) = &self.options.output_path {
            self.storage.write_file(output_path, json.as_bytes()).await?;
            tracing::info!("Bundle written to {}", output_path);
        }

        Ok(BundleReport {
            quotes,
            json,
            output_path: self.options.output_path.clone(),
        })
    }

    async fn read_requested_topics(&self, topics_path: &str) -> Result<TopicWeights> {
        if !self.storage.exists(topics_path).await {
            return Err(BundlerError::TopicsFileNotFound {
                path: topics_path.to_string(),
            });
        }

        let bytes = self.storage.read_file(topics_path).await?;
        let model: Option<RequestedTopicsModel> = serde_json::from_slice(&bytes)?;

        let topics = match model {
            Some(model) if !model.topics.is_empty() => model.topics,
            _ => {
                return Err(BundlerError::EmptyTopicsRequest {
                    path: topics_path.to_string(),
                })
            }
        };

        if let Some((topic, weight)) = topics.iter().find(|(_, w)| **w < Decimal::ZERO) {
            return Err(BundlerError::InvalidTopicWeight {
                topic: topic.clone(),
                weight: weight.to_string(),
            });
        }

        Ok(topics)
    }
}

/// Provider name -> quote as an ordered JSON object. Quotes are written as
/// exact decimal numbers with trailing zeros removed.
pub fn render_bundle(bundle: &ProviderBundle) -> Result<serde_json::Map<String, serde_json::Value>> {
    bundle
        .iter()
        .map(|(provider, quote)| Ok((provider.name().to_string(), decimal_to_json(quote)?)))
        .collect()
}

fn decimal_to_json(value: Decimal) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(&value.normalize().to_string())?)
}
