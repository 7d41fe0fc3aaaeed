// ── Station monitor ──
//
// Owns the registry and drives refresh cycles: once at startup, then on a
// fixed interval, and immediately after every registry replacement.
// Cycles never overlap. Ticks that fall due while a cycle is still
// running are skipped, and the schedule resumes one full interval after
// that cycle ends.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::CoreError;
use crate::model::StationId;
use crate::refresh::{RefreshOutcome, refresh};
use crate::registry::Registry;
use crate::source::StationSource;

const EDIT_CHANNEL_SIZE: usize = 16;

/// Everything a view needs to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// The tracked set was replaced; `url` is the new view URL.
    RegistryChanged {
        stations: Vec<StationId>,
        url: Url,
    },
    /// A refresh cycle started (the view may show a loading state).
    CycleStarted,
    /// A refresh cycle finished. Replaces whatever was shown before.
    Refreshed(RefreshOutcome),
}

/// Background polling loop over a [`StationSource`].
pub struct Monitor<S> {
    source: S,
    registry: Registry,
    interval: Duration,
}

impl<S: StationSource + 'static> Monitor<S> {
    pub fn new(source: S, registry: Registry, interval: Duration) -> Self {
        Self {
            source,
            registry,
            interval,
        }
    }

    /// Spawn the loop on the current runtime.
    pub fn spawn(self, cancel: CancellationToken) -> MonitorHandle {
        let (edit_tx, edit_rx) = mpsc::channel(EDIT_CHANNEL_SIZE);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(edit_rx, event_tx, cancel.clone()));
        MonitorHandle {
            edits: edit_tx,
            events: event_rx,
            cancel,
            task,
        }
    }

    /// Run until cancelled, returning the final registry.
    ///
    /// Registry replacements arrive on `edits`; they are only ever applied
    /// between cycles, never while one is in flight.
    pub async fn run(
        mut self,
        mut edits: mpsc::Receiver<Vec<StationId>>,
        events: mpsc::UnboundedSender<MonitorEvent>,
        cancel: CancellationToken,
    ) -> Registry {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            stations = self.registry.len(),
            interval_secs = self.interval.as_secs(),
            "station monitor started"
        );

        loop {
            // The first tick completes immediately: that is the startup refresh.
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                Some(ids) = edits.recv() => {
                    let changed = self.registry.replace(ids);
                    debug!(changed, stations = self.registry.len(), "registry replaced");
                    let _ = events.send(MonitorEvent::RegistryChanged {
                        stations: self.registry.current(),
                        url: self.registry.url().clone(),
                    });
                    if !self.cycle(&events, &cancel).await {
                        break;
                    }
                    ticker.reset();
                }
                _ = ticker.tick() => {
                    let started = Instant::now();
                    if !self.cycle(&events, &cancel).await {
                        break;
                    }
                    if started.elapsed() >= self.interval {
                        warn!(
                            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                            "refresh overran the poll interval, skipping missed ticks"
                        );
                        ticker.reset();
                    }
                }
            }
        }

        debug!("station monitor stopped");
        self.registry
    }

    /// Run one cycle and publish it. Returns `false` if cancelled mid-cycle.
    async fn cycle(
        &self,
        events: &mpsc::UnboundedSender<MonitorEvent>,
        cancel: &CancellationToken,
    ) -> bool {
        let _ = events.send(MonitorEvent::CycleStarted);
        tokio::select! {
            biased;
            () = cancel.cancelled() => false,
            outcome = refresh(&self.source, &self.registry) => {
                let _ = events.send(MonitorEvent::Refreshed(outcome));
                true
            }
        }
    }
}

/// Handle to a spawned [`Monitor`].
pub struct MonitorHandle {
    edits: mpsc::Sender<Vec<StationId>>,
    events: mpsc::UnboundedReceiver<MonitorEvent>,
    cancel: CancellationToken,
    task: JoinHandle<Registry>,
}

impl MonitorHandle {
    /// Replace the tracked stations; the monitor refreshes right after.
    pub async fn replace(&self, ids: Vec<StationId>) -> Result<(), CoreError> {
        self.edits
            .send(ids)
            .await
            .map_err(|_| CoreError::MonitorStopped)
    }

    /// A cloneable sender for registry replacements.
    pub fn edits(&self) -> mpsc::Sender<Vec<StationId>> {
        self.edits.clone()
    }

    /// Wait for the next event; `None` once the monitor has stopped.
    pub async fn next_event(&mut self) -> Option<MonitorEvent> {
        self.events.recv().await
    }

    /// Stop the loop and return the registry as it was last replaced.
    pub async fn shutdown(self) -> Result<Registry, CoreError> {
        self.cancel.cancel();
        self.task
            .await
            .map_err(|e| CoreError::Internal(format!("monitor task failed: {e}")))
    }
}
