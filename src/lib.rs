pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonProviderRepository, LocalStorage};
pub use app::handlers::{BundleReport, BundleTopicsHandler, RenderOptions};
pub use config::Settings;
pub use core::bundler::BundlerService;
pub use domain::model::{Provider, ProviderBundle, TopicWeights};
pub use domain::outcome::Outcome;
pub use domain::services::TopicsBundlerService;
pub use utils::error::{BundlerError, DomainError, Result};
