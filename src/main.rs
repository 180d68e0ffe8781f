//! Social Harvester - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use social_harvester::{
    cli::Args,
    client::{HttpInstagramClient, HttpTikTokClient},
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    fs::bootstrap_output_tree,
    harvest::{Orchestrator, Pacing, TokioSleeper},
    output::{print_banner, print_config_summary, print_error, print_info, print_run_summary, print_warning},
    platform::{InstagramAdapter, TikTokAdapter},
    MediaDownloader, ProxyPool,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::NoPlatformAvailable => ExitCode::from(exit_codes::NO_PLATFORM as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    print_config_summary(
        &config.instagram.handles,
        &config.tiktok.handles,
        &config.options.output_directory.display().to_string(),
        config.options.posts_per_user,
    );

    // Bootstrap the output tree
    bootstrap_output_tree(
        &config.options.output_directory,
        &config.instagram.handles,
        &config.tiktok.handles,
    )?;

    // Load proxies (non-fatal on any error)
    let proxies = ProxyPool::load(
        config.proxy.list_file.as_deref(),
        config.proxy.fallback.as_deref(),
    );

    // Build the pipeline
    let downloader = Arc::new(MediaDownloader::new()?);
    let sleeper = Arc::new(TokioSleeper);
    let pacing = Pacing::default();

    let instagram = InstagramAdapter::new(
        Arc::new(HttpInstagramClient::new()?),
        downloader.clone(),
        sleeper.clone(),
        config.options.output_directory.clone(),
        config.instagram.username.clone(),
        config.instagram.password.clone(),
        config.instagram.session_id.clone(),
        pacing.instagram_inter_post,
    );

    let tiktok = TikTokAdapter::new(
        Arc::new(HttpTikTokClient::new()),
        downloader,
        sleeper.clone(),
        config.options.output_directory.clone(),
        pacing.tiktok_inter_post,
    );

    let orchestrator = Orchestrator::new(
        Box::new(instagram),
        config.instagram.handles.clone(),
        Box::new(tiktok),
        config.tiktok.handles.clone(),
        proxies,
        pacing,
        sleeper,
        config.options.posts_per_user,
    );

    // Run the harvest
    let store = orchestrator.run().await?;

    // Persist results and report
    let summary = store.flush(&config.result_file()).await?;
    print_run_summary(&summary);
    print_info("Harvest completed");

    Ok(())
}
