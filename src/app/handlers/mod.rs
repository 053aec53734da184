pub mod bundle_topics;

pub use bundle_topics::{render_bundle, BundleReport, BundleTopicsHandler, RenderOptions};
