use crate::domain::model::{Provider, ProviderBundle, TopicWeights};
use crate::domain::outcome::Outcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// Cooperative cancellation flag; `true` means the caller gave up.
pub type CancelSignal = watch::Receiver<bool>;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Source of the provider catalog.
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn get_all(&self, cancel: &CancelSignal) -> Outcome<Vec<Provider>>;
}

/// The allocation engine.
pub trait TopicsBundler: Send + Sync {
    fn create_bundle(
        &self,
        providers: &[Provider],
        requested_topics: &TopicWeights,
    ) -> Outcome<ProviderBundle>;
}

/// Fetches the catalog and runs the allocation engine over it.
#[async_trait]
pub trait BundleCreator: Send + Sync {
    async fn create_bundle(
        &self,
        requested_topics: &TopicWeights,
        cancel: &CancelSignal,
    ) -> Outcome<ProviderBundle>;
}
