pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_PROVIDERS_PATH: &str = "./data/providers.json";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "course-bundler")]
#[command(about = "Allocates quotes to course providers for a weighted topic request")]
pub struct CliConfig {
    /// The file path to the topics JSON file
    #[arg(long)]
    pub topics_path: String,

    /// Provider catalog JSON file
    #[arg(long)]
    pub providers_path: Option<String>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also write the rendered bundle to this file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Render the bundle on a single line
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges the flags over the settings file (if any) and the defaults.
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let settings = Settings::merge(
            Overrides {
                topics_path: self.topics_path.clone(),
                providers_path: self.providers_path.clone(),
                output_path: self.output.clone(),
                compact: self.compact,
                verbose: self.verbose,
            },
            file,
        );
        settings.validate()?;
        Ok(settings)
    }
}

/// Values given on the command line; `None`/`false` defer to the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub topics_path: String,
    pub providers_path: Option<String>,
    pub output_path: Option<String>,
    pub compact: bool,
    pub verbose: bool,
}

/// Effective runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub topics_path: String,
    pub providers_path: String,
    pub output_path: Option<String>,
    pub pretty: bool,
    pub verbose: bool,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn merge(overrides: Overrides, file: TomlConfig) -> Self {
        Self {
            topics_path: overrides.topics_path,
            providers_path: overrides
                .providers_path
                .or(file.providers.path)
                .unwrap_or_else(|| DEFAULT_PROVIDERS_PATH.to_string()),
            output_path: overrides.output_path.or(file.output.path),
            pretty: !overrides.compact && file.output.pretty.unwrap_or(true),
            verbose: overrides.verbose,
            log_level: file.logging.level,
            log_format: file.logging.format.unwrap_or_default(),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("topics_path", &self.topics_path)?;
        validation::validate_file_extension("topics_path", &self.topics_path, &["json"])?;
        validation::validate_path("providers_path", &self.providers_path)?;
        validation::validate_file_extension("providers_path", &self.providers_path, &["json"])?;

        if let Some(output_path) = &self.output_path {
            validation::validate_path("output_path", output_path)?;
        }

        if let Some(level) = &self.log_level {
            validation::validate_log_level("logging.level", level)?;
        }

        Ok(())
    }
}
