use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use carsift_config::{ConfigLoad, ConfigLoader, GalleryConfig};
use carsift_model::prelude::{
    AdSummary, AssetIndex, EntityKey, JobPhase, JobStatus, SourceRef,
};
use carsift_viewer::common::messages::{CardMessage, Message};
use carsift_viewer::domains::acquisition::{AcquisitionStatus, PollPolicy};
use carsift_viewer::domains::gallery::{GalleryMessage, NavKey, NavigationInput};
use carsift_viewer::infra::errors::AcquisitionError;
use carsift_viewer::infra::services::{AcquisitionApiService, AssetFetch};
use carsift_viewer::infra::testing::ScriptedAcquisitionService;
use carsift_viewer::{App, Runtime, app};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::{Builder, Target};
use log::LevelFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "carsift", version, about = "Fetch and page through ad galleries")]
struct Cli {
    /// Backend origin; overrides configuration files and CARSIFT_SERVER_URL.
    #[arg(long, global = true)]
    server_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Make sure an ad's gallery exists, triggering acquisition if needed.
    Acquire {
        /// Entity key of the ad.
        ad_id: String,
        /// Listing URL the backend scrapes images from.
        #[arg(long)]
        source_ref: String,
        /// Download every ready asset into this directory.
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },
    /// Run the acquisition flow against a scripted in-memory backend.
    Demo {
        #[arg(long, value_enum, default_value_t = Scenario::Slow)]
        scenario: Scenario,
    },
    /// Print the resolved configuration.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Assets already exist.
    Ready,
    /// Assets appear after a few polls.
    Slow,
    /// The job completes without producing anything.
    Empty,
    /// The job reports failure.
    Failed,
    /// The backend refuses the trigger.
    Rejected,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("carsift_viewer", LevelFilter::Debug)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let mut load = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;
    if let Some(url) = cli.server_url.clone() {
        load.override_server_url(url).context("invalid --server-url")?;
    }
    log::debug!("Configuration loaded from {}", load.source);

    match cli.command {
        Command::Acquire {
            ad_id,
            source_ref,
            save_dir,
        } => {
            let service = app::build_service(&load.config.server)
                .context("failed to build HTTP client")?;
            let ad = AdSummary::new(
                EntityKey::new(ad_id)?,
                SourceRef::new(source_ref)?,
            );
            let app = App::new(Arc::clone(&service), &load.config);
            acquire(app, ad, service, save_dir.as_deref()).await
        }
        Command::Demo { scenario } => demo(scenario).await,
        Command::Config => {
            print_config(&load);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn acquire(
    app: App,
    ad: AdSummary,
    service: Arc<dyn AcquisitionApiService>,
    save_dir: Option<&Path>,
) -> Result<ExitCode> {
    let key = ad.key.clone();
    let mut runtime = Runtime::new(app);
    runtime.dispatch(Message::Card(CardMessage::Show(ad)));
    runtime.dispatch(Message::Gallery(GalleryMessage::Open));

    let status = drive(&mut runtime).await;
    match status {
        Some(AcquisitionStatus::Ready(count)) => {
            println!("{key}: {count} images ready");
            if let Some(dir) = save_dir {
                save_assets(&*service, &key, count.get(), dir).await?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(other) => {
            println!("{key}: {other}");
            Ok(ExitCode::FAILURE)
        }
        None => {
            println!("{key}: acquisition did not start");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Apply task results until the coordinator settles, echoing the gallery
/// status line whenever it changes.
async fn drive(runtime: &mut Runtime<App>) -> Option<AcquisitionStatus> {
    let mut last_line = String::new();
    loop {
        if let Some(gallery) = runtime.view().gallery {
            let line = gallery.status_line();
            if line != last_line {
                println!("  {line}");
                last_line = line;
            }
        }
        let status = runtime.program().acquisition().map(|s| s.status);
        if status.as_ref().is_some_and(|s| s.is_terminal()) {
            return status;
        }
        if !runtime.step().await {
            return status;
        }
    }
}

async fn save_assets(
    service: &dyn AcquisitionApiService,
    key: &EntityKey,
    count: u32,
    dir: &Path,
) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    for index in 1..=count {
        let index = AssetIndex::new(index)?;
        match service.fetch_asset(key, index).await? {
            AssetFetch::Ready(bytes) => {
                let path =
                    dir.join(format!("{}-{}.jpg", key, index.to_path_segment()));
                std::fs::write(&path, bytes)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("  saved {}", path.display());
            }
            AssetFetch::NotMaterialized => {
                log::warn!("{key}: asset {index} not materialized yet, skipping");
            }
        }
    }
    Ok(())
}

fn scenario_service(scenario: Scenario, key: &EntityKey) -> ScriptedAcquisitionService {
    let stub = ScriptedAcquisitionService::new();
    match scenario {
        Scenario::Ready => stub.with_counts(key, [6]),
        Scenario::Slow => stub.with_counts(key, [0, 3]).with_progress(
            key,
            [
                JobStatus::running(0, 0),
                JobStatus::running(0, 8),
                JobStatus::running(3, 8),
            ],
        ),
        Scenario::Empty => stub.with_progress(
            key,
            [
                JobStatus::running(0, 0),
                JobStatus::new(JobPhase::Complete, 0, 0),
            ],
        ),
        Scenario::Failed => stub
            .with_progress(key, [JobStatus::running(0, 4), JobStatus::failed()]),
        Scenario::Rejected => stub.reject_trigger(
            key,
            AcquisitionError::status(503, "acquisition queue full"),
        ),
    }
}

async fn demo(scenario: Scenario) -> Result<ExitCode> {
    let key = EntityKey::new("demo-202410")?;
    let ad = AdSummary::new(
        key.clone(),
        SourceRef::new("https://listings.example/ad/demo-202410")?,
    )
    .with_title("2014 Skoda Octavia 1.6 TDI");

    let service: Arc<dyn AcquisitionApiService> =
        Arc::new(scenario_service(scenario, &key));
    let policy = PollPolicy {
        interval: Duration::from_millis(150),
        max_attempts: 10,
    };
    let app = App::with_parts(service, policy, GalleryConfig::default());
    let mut runtime = Runtime::new(app);

    println!("demo scenario: {scenario:?}");
    runtime.dispatch(Message::Card(CardMessage::Show(ad)));
    if let Some(card) = runtime.view().card {
        println!("  card face: {}", card.face.url());
    }
    runtime.dispatch(Message::Gallery(GalleryMessage::Open));

    let status = drive(&mut runtime).await;
    let Some(AcquisitionStatus::Ready(count)) = status else {
        return Ok(ExitCode::FAILURE);
    };

    for _ in 1..count.get() {
        runtime.dispatch(Message::Gallery(GalleryMessage::Navigate(
            NavigationInput::Key(NavKey::ArrowRight),
        )));
        if let Some(gallery) = runtime.view().gallery {
            println!("  {}", gallery.status_line());
        }
    }
    runtime.dispatch(Message::Gallery(GalleryMessage::Navigate(
        NavigationInput::Key(NavKey::Escape),
    )));
    if let Some(card) = runtime.view().card {
        println!("  card face: {}", card.face.url());
    }
    Ok(ExitCode::SUCCESS)
}

fn print_config(load: &ConfigLoad) {
    let config = &load.config;
    let server = &config.server;
    println!("source:            {}", load.source);
    println!("env file loaded:   {}", load.env_file_loaded);
    if !load.overrides.is_empty() {
        println!("overrides:         {}", load.overrides.join(", "));
    }
    println!("server.base_url:   {}", server.base_url_str());
    println!(
        "server.timeout:    {}",
        humantime::format_duration(server.request_timeout)
    );
    println!(
        "poll.interval:     {}",
        humantime::format_duration(config.acquisition.poll_interval)
    );
    println!("poll.max_attempts: {}", config.acquisition.max_poll_attempts);
    println!(
        "poll.ceiling:      {}",
        humantime::format_duration(config.acquisition.ceiling())
    );
    println!("gallery.swipe_px:  {}", config.gallery.swipe_threshold_px);
}
