use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use lens_config::Config;
use lens_core::{TranslationCache, WorkerExecutor};
use lens_ocr::{ScreenCapture, TesseractRecognizer, ensure_language};
use lens_types::OcrLanguage;
use tracing_subscriber::EnvFilter;

mod cli;
mod controller;
mod profile;
mod ui;

use self::cli::Cli;
use self::controller::AppController;
use self::profile::ProfileStore;

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lens=info,warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_target(false).compact().init();
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;
    let result = runtime.block_on(run(cli));
    // The stdin reader may still sit in a blocking read
    runtime.shutdown_timeout(Duration::from_millis(250));
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = ProfileStore::default_location();
    match store.init() {
        Ok(()) => tracing::debug!("Profiles in {}", store.dir().display()),
        Err(e) => tracing::warn!("Profiles unavailable: {:#}", e),
    }
    let mut config: Config = store.load(&cli.profile)?;
    config.apply_env();
    cli.apply(&mut config);
    tracing::info!(
        "Profile {}: {} -> {} via {}",
        cli.profile,
        config.ocr.language.display_name(),
        config.translator.target_language.display_name(),
        config.translator.provider
    );

    if config.ocr.auto_provision {
        provision_languages(&mut config).await;
    }

    let recognizer = TesseractRecognizer::from_config(&config.ocr);
    match recognizer.probe() {
        Ok(version) => tracing::info!("Using {}", version),
        Err(e) => tracing::warn!("{} (recognition will fail until tesseract is installed)", e),
    }

    let translator = lens_translator::build_translator(&config.translator)?;
    let executor = WorkerExecutor::new(
        Arc::new(ScreenCapture::new()),
        Arc::new(recognizer),
        translator,
        TranslationCache::new(config.pipeline.cache.into()),
        Duration::from_millis(config.translator.timeout_ms),
    )
    .with_skip_identical_frames(config.pipeline.skip_identical_frames);

    let controller = AppController::new();
    let tasks = controller.spawn_tasks(&config, executor);
    controller.run(tasks).await
}

/// Fetch the source language now; the rest of the set in the background so
/// later language switches find their data.
async fn provision_languages(config: &mut Config) {
    let dir = config
        .ocr
        .tessdata_dir
        .clone()
        .unwrap_or_else(profile::default_tessdata_dir);
    let url = config.ocr.tessdata_url.clone();

    match ensure_language(&dir, config.ocr.language, &url).await {
        Ok(_) => config.ocr.tessdata_dir = Some(dir.clone()),
        Err(e) => {
            tracing::warn!(
                "Could not provision {} language data: {}",
                config.ocr.language.code(),
                e
            );
            return;
        }
    }

    let source = config.ocr.language;
    tokio::spawn(async move {
        for language in OcrLanguage::ALL.into_iter().filter(|l| *l != source) {
            if let Err(e) = ensure_language(&dir, language, &url).await {
                tracing::warn!("Could not provision {} language data: {}", language.code(), e);
            }
        }
    });
}
