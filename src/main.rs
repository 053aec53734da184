use clap::Parser;
use course_bundler::utils::cancellation::cancel_pair;
use course_bundler::utils::error::ErrorSeverity;
use course_bundler::utils::logger;
use course_bundler::{
    BundleTopicsHandler, BundlerService, CliConfig, JsonProviderRepository, LocalStorage,
    RenderOptions, TopicsBundlerService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(
        settings.verbose,
        settings.log_level.as_deref(),
        settings.log_format,
    );

    tracing::info!("Starting course-bundler");
    tracing::debug!("Settings: {:?}", settings);

    let (cancel_tx, cancel) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling");
            let _ = cancel_tx.send(true);
        }
    });

    let storage = LocalStorage::default();
    let repository = JsonProviderRepository::new(storage.clone(), settings.providers_path.clone());
    let service = BundlerService::new(repository, TopicsBundlerService::new());
    let handler = BundleTopicsHandler::new(
        service,
        storage,
        RenderOptions {
            pretty: settings.pretty,
            output_path: settings.output_path.clone(),
        },
    );

    match handler.handle(&settings.topics_path, &cancel).await {
        Ok(report) => {
            println!("{}", report.json);
            if let Some(path) = &report.output_path {
                tracing::info!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Bundling failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
