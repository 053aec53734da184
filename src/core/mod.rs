pub mod bundler;

pub use crate::domain::model::{Provider, ProviderBundle, TopicWeights};
pub use crate::domain::outcome::Outcome;
pub use crate::domain::ports::{
    BundleCreator, CancelSignal, ProviderRepository, Storage, TopicsBundler,
};
pub use crate::utils::error::Result;
