use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use placecache::cache::{CacheCodec, KeyValueStore, NoopStorage, SqliteStorage};
use placecache::config::Config;
use placecache::executor::BackgroundExecutor;
use placecache::logging::{self, LoggingGuard};
use placecache::place::{
  extract_place_id, HttpPlaceProvider, HttpRemoteStore, NullRemoteStore, PlaceService,
  RemoteStore,
};

/// How long to wait for background refreshes before exiting.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "placecache")]
#[command(about = "Cached place details with remote-store sync")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/placecache/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fetch details for a place and print them as JSON
  Fetch {
    place_id: String,
    /// Skip the local cache
    #[arg(short, long)]
    force: bool,
  },
  /// Extract a place id from a shareable URL
  Extract { url: String },
  /// Report whether cached photo URLs are due for refresh
  Photos { place_id: String },
  /// Remove a place from the local cache
  Evict { place_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  run(args.config.as_deref(), args.command).await
}

async fn run(config_path: Option<&Path>, command: Command) -> Result<()> {
  match command {
    // Extraction needs neither config nor logging
    Command::Extract { url } => {
      let id = extract_place_id(&url).ok_or_else(|| eyre!("No place id found in {}", url))?;
      println!("{}", id);
    }
    Command::Fetch { place_id, force } => {
      let (_guard, service) = open_service(config_path)?;
      let result = service.fetch_with_source(&place_id, force).await?;
      eprintln!("source: {}", result.source);
      println!("{}", serde_json::to_string_pretty(&result.data)?);

      if !service.executor().drain(DRAIN_TIMEOUT).await {
        eprintln!("warning: background refresh still running at exit");
      }
    }
    Command::Photos { place_id } => {
      let (_guard, service) = open_service(config_path)?;
      println!("{}", service.should_refresh_photos(&place_id, None));
    }
    Command::Evict { place_id } => {
      let (_guard, service) = open_service(config_path)?;
      if !service.evict(&place_id) {
        return Err(eyre!("Failed to evict {}", place_id));
      }
    }
  }

  Ok(())
}

/// Start file logging, load config and wire up the service.
fn open_service(config_path: Option<&Path>) -> Result<(LoggingGuard, PlaceService)> {
  let guard = logging::init_logging(&logging::default_log_dir()?)?;
  let config = Config::load(config_path)?;
  Ok((guard, build_service(&config)?))
}

fn build_service(config: &Config) -> Result<PlaceService> {
  let storage: Arc<dyn KeyValueStore> = if config.cache.enabled {
    match &config.cache.path {
      Some(path) => Arc::new(SqliteStorage::open_at(path)?),
      None => Arc::new(SqliteStorage::open()?),
    }
  } else {
    Arc::new(NoopStorage)
  };

  let codec = CacheCodec::new(storage)
    .with_namespace(config.cache.namespace.clone())
    .with_version(config.cache.version.clone());

  let provider = Arc::new(HttpPlaceProvider::new(
    &config.provider.url,
    config.get_api_key()?,
  )?);

  let remote: Arc<dyn RemoteStore> = match &config.remote_store {
    Some(remote) => Arc::new(HttpRemoteStore::new(&remote.url)?),
    None => Arc::new(NullRemoteStore),
  };

  let executor = BackgroundExecutor::new(config.cache.executor_delays());

  Ok(
    PlaceService::new(codec, provider, remote, executor)
      .with_policy(config.cache.freshness_policy())
      .with_max_photos(config.cache.max_photos),
  )
}
