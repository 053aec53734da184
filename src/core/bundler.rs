use crate::core::{
    BundleCreator, CancelSignal, Outcome, ProviderBundle, ProviderRepository, TopicWeights,
    TopicsBundler,
};
use crate::utils::cancellation::is_cancelled;
use crate::utils::error::BundlerError;
use async_trait::async_trait;

/// Loads the provider catalog and hands it to the allocation engine.
pub struct BundlerService<R: ProviderRepository, B: TopicsBundler> {
    repository: R,
    bundler: B,
}

impl<R: ProviderRepository, B: TopicsBundler> BundlerService<R, B> {
    pub fn new(repository: R, bundler: B) -> Self {
        Self {
            repository,
            bundler,
        }
    }
}

#[async_trait]
impl<R: ProviderRepository, B: TopicsBundler> BundleCreator for BundlerService<R, B> {
    async fn create_bundle(
        &self,
        requested_topics: &TopicWeights,
        cancel: &CancelSignal,
    ) -> Outcome<ProviderBundle> {
        let providers = match self.repository.get_all(cancel).await {
            Outcome::Value(providers) => providers,
            Outcome::Error(e) => return Outcome::Error(e),
        };

        if is_cancelled(cancel) {
            tracing::warn!("Cancelled after loading providers, skipping bundling");
            return BundlerError::Cancelled.into();
        }

        tracing::debug!(
            providers = providers.len(),
            topics = requested_topics.len(),
            "Creating bundle"
        );
        self.bundler.create_bundle(&providers, requested_topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Provider;
    use crate::utils::cancellation::cancel_pair;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct StubRepository {
        providers: Option<Vec<Provider>>,
        calls: Arc<AtomicUsize>,
    }

    impl StubRepository {
        fn returning(providers: Vec<Provider>) -> Self {
            Self {
                providers: Some(providers),
                calls: Arc::default(),
            }
        }

        fn failing() -> Self {
            Self {
                providers: None,
                calls: Arc::default(),
            }
        }
    }

    #[async_trait]
    impl ProviderRepository for StubRepository {
        async fn get_all(&self, _cancel: &CancelSignal) -> Outcome<Vec<Provider>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.providers {
                Some(providers) => Outcome::from_value(providers.clone()),
                None => BundlerError::repository("Repository error").into(),
            }
        }
    }

    /// Records what it was called with and returns a fixed bundle.
    #[derive(Default)]
    struct RecordingBundler {
        seen: Arc<Mutex<Vec<(Vec<String>, usize)>>>,
        bundle: ProviderBundle,
    }

    impl TopicsBundler for RecordingBundler {
        fn create_bundle(
            &self,
            providers: &[Provider],
            requested_topics: &TopicWeights,
        ) -> Outcome<ProviderBundle> {
            self.seen.lock().unwrap().push((
                providers.iter().map(|p| p.name().to_string()).collect(),
                requested_topics.len(),
            ));
            Outcome::from_value(self.bundle.clone())
        }
    }

    fn requested() -> TopicWeights {
        [("Topic1".to_string(), dec!(0.5)), ("Topic2".to_string(), dec!(0.5))]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_repository_error_skips_engine() {
        let bundler = RecordingBundler::default();
        let seen = bundler.seen.clone();
        let service = BundlerService::new(StubRepository::failing(), bundler);
        let (_tx, cancel) = cancel_pair();

        let outcome = service.create_bundle(&TopicWeights::new(), &cancel).await;

        assert!(outcome.has_error());
        assert_eq!(outcome.error(), &BundlerError::repository("Repository error"));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_passes_providers_to_engine() {
        let providers = vec![
            Provider::new("Provider1", ["Topic1", "Topic2"]),
            Provider::new("Provider2", ["Topic2", "Topic3"]),
        ];
        let mut expected = ProviderBundle::new();
        expected.add_to_bundle(providers[0].clone(), dec!(0.5));
        expected.add_to_bundle(providers[1].clone(), dec!(0.5));

        let bundler = RecordingBundler {
            bundle: expected.clone(),
            ..Default::default()
        };
        let seen = bundler.seen.clone();
        let repository = StubRepository::returning(providers);
        let calls = repository.calls.clone();
        let service = BundlerService::new(repository, bundler);
        let (_tx, cancel) = cancel_pair();

        let outcome = service.create_bundle(&requested(), &cancel).await;

        assert_eq!(outcome, Outcome::from_value(expected));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(vec!["Provider1".to_string(), "Provider2".to_string()], 2)]
        );
    }

    #[tokio::test]
    async fn test_cancelled_signal_skips_engine() {
        let bundler = RecordingBundler::default();
        let seen = bundler.seen.clone();
        let repository = StubRepository::returning(vec![Provider::new("Provider1", ["Topic1"])]);
        let service = BundlerService::new(repository, bundler);
        let (tx, cancel) = cancel_pair();
        tx.send(true).unwrap();

        let outcome = service.create_bundle(&requested(), &cancel).await;

        assert!(matches!(outcome.error(), BundlerError::Cancelled));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_engine_domain_error_is_returned() {
        let repository = StubRepository::returning(vec![Provider::new("Provider1", ["Topic3"])]);
        let service = BundlerService::new(repository, crate::domain::services::TopicsBundlerService);
        let (_tx, cancel) = cancel_pair();

        let outcome = service.create_bundle(&requested(), &cancel).await;

        assert_eq!(outcome.error().to_string(), "No topics matched.");
    }
}
