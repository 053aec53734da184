// Adapters layer: concrete implementations of the domain ports (storage, provider catalog).

pub mod provider_repository;
pub mod storage;

pub use provider_repository::JsonProviderRepository;
pub use storage::LocalStorage;
