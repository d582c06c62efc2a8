use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use thumbgate::application::{BackendSelector, ThumbnailGateway};
use thumbgate::domain::entities::{BackendKind, PageUrl, RequestId};
use thumbgate::domain::ports::{BackendPort, ResourceBundlePort};
use thumbgate::infrastructure::{
    AppConfig, BundledResources, ChannelResponseSink, CliArgs, HistoryBackend, HistoryService,
    MemoryThumbnailStore, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    Ok(())
}

/// Synthetic thumbnail bytes for the demo seed data.
fn sample_thumbnail(tag: u8) -> Bytes {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend(std::iter::repeat_n(tag, 60));
    bytes.extend([0xFF, 0xD9]);
    Bytes::from(bytes)
}

fn seed_store(store: &MemoryThumbnailStore) {
    store.insert(&PageUrl::new("https://example.com/"), sample_thumbnail(0x11));
    store.insert(
        &PageUrl::new("https://www.rust-lang.org/"),
        sample_thumbnail(0x22),
    );
    // The plain-http variant redirects to the canonical page.
    store.insert_redirect(
        &PageUrl::new("http://example.com/"),
        &PageUrl::new("https://example.com/"),
    );
    info!(count = store.len(), "Thumbnail store seeded");
}

fn seed_history(service: &mut HistoryService) {
    service.record_thumbnail(&PageUrl::new("https://example.com/"), sample_thumbnail(0x11));
    service.record_thumbnail(
        &PageUrl::new("https://www.rust-lang.org/"),
        sample_thumbnail(0x22),
    );
    info!(count = service.len(), "History service seeded");
}

fn default_demo_urls() -> Vec<String> {
    vec![
        "https://example.com/".to_string(),
        "http://example.com/".to_string(),
        "https://www.rust-lang.org/".to_string(),
        "https://unknown.example/".to_string(),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let mut args = CliArgs::parse();
    let urls = std::mem::take(&mut args.urls);

    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config)?;
    info!(version = thumbgate::VERSION, "Starting thumbgate");

    let resources = BundledResources::from_config(config.default_thumbnail.as_deref()).await?;
    let default_bytes = resources.load_default_thumbnail();

    let (sink, mut response_rx) = ChannelResponseSink::new();
    let (completion_tx, completion_rx) = mpsc::unbounded_channel();

    let selector = BackendSelector::new(config.use_thumbnail_store);
    let mut store_handle = None;
    let backend: Arc<dyn BackendPort> = match selector.select() {
        BackendKind::Primary => {
            let store = Arc::new(MemoryThumbnailStore::new(
                config.store.capacity,
                completion_tx,
            ));
            seed_store(&store);
            store_handle = Some(store.clone());
            store
        }
        BackendKind::Legacy => {
            let client = if config.history.enabled {
                let mut service = HistoryService::new();
                seed_history(&mut service);
                Some(service.spawn())
            } else {
                warn!("History service disabled, lookups will answer absent");
                None
            };
            Arc::new(HistoryBackend::new(client, completion_tx))
        }
    };

    let gateway = ThumbnailGateway::spawn(
        backend,
        completion_rx,
        Arc::new(resources),
        Arc::new(sink),
    );

    let urls = if urls.is_empty() {
        default_demo_urls()
    } else {
        urls
    };
    for (index, url) in urls.iter().enumerate() {
        let request_id = RequestId::new(index as u64 + 1);
        info!(request_id = %request_id, url = %url, "Submitting lookup");
        gateway.lookup(PageUrl::new(url.clone()), request_id)?;
    }

    let mut received = 0;
    while received < urls.len() {
        match tokio::time::timeout(Duration::from_secs(5), response_rx.recv()).await {
            Ok(Some(response)) => {
                received += 1;
                match &response.thumbnail {
                    None => info!(
                        request_id = %response.request_id,
                        "No backend available for this lookup"
                    ),
                    Some(bytes) if *bytes == default_bytes => info!(
                        request_id = %response.request_id,
                        size = bytes.len(),
                        "Resolved with the default thumbnail"
                    ),
                    Some(bytes) => info!(
                        request_id = %response.request_id,
                        size = bytes.len(),
                        "Resolved with a stored thumbnail"
                    ),
                }
            }
            Ok(None) => break,
            Err(_) => {
                warn!(
                    received,
                    expected = urls.len(),
                    "Timed out waiting for responses"
                );
                break;
            }
        }
    }

    if let Some(store) = store_handle {
        info!(stats = %store.stats(), "Store statistics");
    }

    gateway.shutdown().await;
    info!("Thumbgate stopped");

    Ok(())
}
