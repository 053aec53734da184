//! Topic allocation engine.
//!
//! Given a provider catalog and a topic -> weight request, the engine keeps the
//! three heaviest topics and quotes every provider by how many of them it
//! covers:
//!
//! - two matched topics: 10% of the two weights combined;
//! - one matched topic: 20%, 25% or 30% of its weight for the first, second
//!   or third heaviest topic;
//! - any other match count: no quote.
//!
//! Providers covering all three kept topics get no quote either. When several
//! providers share a name only the first one in the catalog is considered.

use crate::domain::model::{Provider, ProviderBundle, TopicWeights};
use crate::domain::outcome::Outcome;
use crate::domain::ports::TopicsBundler;
use crate::utils::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};

pub const MAX_TRIMMED_TOPICS: usize = 3;

pub const TWO_TOPIC_RATE: Decimal = dec!(0.1);

/// Single-match rate by rank of the matched topic.
pub const SINGLE_TOPIC_RATES: [Decimal; MAX_TRIMMED_TOPICS] = [dec!(0.2), dec!(0.25), dec!(0.3)];

#[derive(Debug, Clone, Copy, Default)]
pub struct TopicsBundlerService;

impl TopicsBundlerService {
    pub fn new() -> Self {
        Self
    }
}

impl TopicsBundler for TopicsBundlerService {
    fn create_bundle(
        &self,
        providers: &[Provider],
        requested_topics: &TopicWeights,
    ) -> Outcome<ProviderBundle> {
        if providers.is_empty() {
            return DomainError::NoProviders.into();
        }

        if requested_topics.is_empty() {
            return DomainError::NoTopics.into();
        }

        let ranked = RankedTopics::trim(requested_topics);
        tracing::debug!(topics = ?ranked.names(), "Trimmed requested topics");

        let mut bundle = ProviderBundle::new();
        let mut seen = HashSet::new();
        for provider in providers {
            if !seen.insert(provider.name()) {
                tracing::warn!(provider = provider.name(), "Duplicate provider name skipped");
                continue;
            }

            match ranked.quote(provider) {
                Ok(Some(quote)) => bundle.add_to_bundle(provider.clone(), quote),
                Ok(None) => {}
                Err(e) => return e.into(),
            }
        }

        if bundle.is_empty() {
            return DomainError::NoTopicsMatched.into();
        }

        tracing::debug!(providers = bundle.len(), "Bundle created");
        Outcome::from_value(bundle)
    }
}

/// The heaviest requested topics, heaviest first.
#[derive(Debug)]
struct RankedTopics<'a> {
    ordered: Vec<(&'a str, Decimal)>,
    weights: HashMap<&'a str, (usize, Decimal)>,
}

impl<'a> RankedTopics<'a> {
    /// Keeps the `MAX_TRIMMED_TOPICS` heaviest topics. Equal weights are
    /// ordered by topic name so the cut is deterministic.
    fn trim(requested_topics: &'a TopicWeights) -> Self {
        let mut ordered: Vec<(&str, Decimal)> = requested_topics
            .iter()
            .map(|(topic, weight)| (topic.as_str(), *weight))
            .collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ordered.truncate(MAX_TRIMMED_TOPICS);

        let weights = ordered
            .iter()
            .enumerate()
            .map(|(rank, (topic, weight))| (*topic, (rank, *weight)))
            .collect();

        Self { ordered, weights }
    }

    fn names(&self) -> Vec<&'a str> {
        self.ordered.iter().map(|(topic, _)| *topic).collect()
    }

    fn quote(&self, provider: &Provider) -> Result<Option<Decimal>, DomainError> {
        let matched = provider.match_topics(self.ordered.iter().map(|(topic, _)| *topic));

        let quote = match matched.as_slice() {
            [first, second] => self
                .weight(first)
                .checked_add(self.weight(second))
                .and_then(|sum| sum.checked_mul(TWO_TOPIC_RATE)),
            [only] => {
                let (rank, weight) = self.weights[*only];
                weight.checked_mul(SINGLE_TOPIC_RATES[rank])
            }
            _ => {
                tracing::trace!(
                    provider = provider.name(),
                    matched = matched.len(),
                    "Provider not quoted"
                );
                return Ok(None);
            }
        };

        let quote = quote.ok_or(DomainError::QuoteOverflow)?;
        if quote > Decimal::ZERO {
            tracing::trace!(provider = provider.name(), %quote, "Provider quoted");
            Ok(Some(quote))
        } else {
            Ok(None)
        }
    }

    fn weight(&self, topic: &str) -> Decimal {
        self.weights[topic].1
    }
}
