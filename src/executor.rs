//! Detached background work.
//!
//! Refreshes and remote-store writes run after the call that triggered them
//! has already returned. The executor owns the delay applied to each kind of
//! task so that they don't compete with the foreground request.

use color_eyre::Result;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Kind of detached task, which determines its start delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
  /// Refetch to repair photo URLs that are about to expire
  PhotoRepair,
  /// Routine refresh of a fresh-but-aging entry
  AgingRefresh,
  /// Push a freshly fetched record to the remote store
  RemoteSync,
}

impl TaskKind {
  fn label(self) -> &'static str {
    match self {
      TaskKind::PhotoRepair => "photo-repair",
      TaskKind::AgingRefresh => "aging-refresh",
      TaskKind::RemoteSync => "remote-sync",
    }
  }
}

/// Start delays per task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorDelays {
  pub photo_repair: Duration,
  pub aging_refresh: Duration,
  pub remote_sync: Duration,
}

impl Default for ExecutorDelays {
  fn default() -> Self {
    Self {
      photo_repair: Duration::from_millis(100),
      aging_refresh: Duration::from_millis(2000),
      remote_sync: Duration::ZERO,
    }
  }
}

impl ExecutorDelays {
  fn for_kind(&self, kind: TaskKind) -> Duration {
    match kind {
      TaskKind::PhotoRepair => self.photo_repair,
      TaskKind::AgingRefresh => self.aging_refresh,
      TaskKind::RemoteSync => self.remote_sync,
    }
  }
}

/// Spawns fire-and-forget tasks on the tokio runtime.
///
/// Tasks are neither cancellable nor awaited. Errors are logged and dropped.
#[derive(Clone, Default)]
pub struct BackgroundExecutor {
  delays: ExecutorDelays,
  in_flight: Arc<AtomicUsize>,
}

impl BackgroundExecutor {
  pub fn new(delays: ExecutorDelays) -> Self {
    Self {
      delays,
      in_flight: Arc::new(AtomicUsize::new(0)),
    }
  }

  /// Number of submitted tasks that have not finished yet.
  pub fn in_flight(&self) -> usize {
    self.in_flight.load(Ordering::SeqCst)
  }

  /// Submit a detached task for `place_id`.
  pub fn submit<Fut>(&self, kind: TaskKind, place_id: &str, task: Fut)
  where
    Fut: Future<Output = Result<()>> + Send + 'static,
  {
    let delay = self.delays.for_kind(kind);
    let place_id = place_id.to_string();
    let in_flight = Arc::clone(&self.in_flight);
    in_flight.fetch_add(1, Ordering::SeqCst);

    debug!(task = kind.label(), place_id = %place_id, ?delay, "Scheduling background task");

    tokio::spawn(async move {
      if !delay.is_zero() {
        tokio::time::sleep(delay).await;
      }

      if let Err(e) = task.await {
        warn!(task = kind.label(), place_id = %place_id, error = %e, "Background task failed");
      }

      in_flight.fetch_sub(1, Ordering::SeqCst);
    });
  }

  /// Wait until no submitted task is running, or until `timeout` elapses.
  ///
  /// Returns `true` if everything finished.
  pub async fn drain(&self, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while self.in_flight() > 0 {
      if tokio::time::Instant::now() >= deadline {
        return false;
      }
      tokio::time::sleep(Duration::from_millis(10)).await;
    }
    true
  }
}
