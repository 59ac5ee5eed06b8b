//! Timer task that owns and advances the metric window.
//!
//! Exactly one task writes the window. Each tick it builds the next window
//! and publishes it as a fresh `Arc<MetricWindow>` through a `watch` channel,
//! so readers always see a whole window and never a half-shifted one.
//! Nothing else (UI, HTTP handlers, AI calls) can block or mutate it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::simulator::MetricSimulator;
use crate::window::{DEFAULT_WINDOW_SIZE, MetricWindow};

/// Period between advances.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(5000);

/// Feed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub window_size: usize,
    pub interval: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Messages accepted by the feed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    /// Advance immediately, even while paused.
    AdvanceNow,
    /// End the task. The last published window stays readable.
    Stop,
}

/// Entry point for starting a feed.
pub struct MetricFeed;

impl MetricFeed {
    /// Initialize a window and start advancing it on `config.interval`.
    ///
    /// The window is filled before this returns, so subscribers immediately
    /// see `config.window_size` records. The first advance happens one full
    /// interval later. Must be called from within a tokio runtime.
    pub fn spawn(mut sim: MetricSimulator, config: FeedConfig) -> FeedHandle {
        let initial = Arc::new(MetricWindow::initialize(&mut sim, config.window_size));
        let (window_tx, window_rx) = watch::channel(Arc::clone(&initial));
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let paused = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn(run_feed(
            sim,
            initial,
            config.interval,
            window_tx,
            cmd_rx,
            Arc::clone(&paused),
        ));

        log::info!(
            "metric feed started: {} records every {:?}",
            config.window_size,
            config.interval
        );

        FeedHandle {
            window: window_rx,
            commands: cmd_tx,
            paused,
            task,
        }
    }
}

/// Control and read side of a running feed. Dropping it stops the task.
pub struct FeedHandle {
    window: watch::Receiver<Arc<MetricWindow>>,
    commands: mpsc::UnboundedSender<FeedCommand>,
    paused: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl FeedHandle {
    /// The most recently published window.
    pub fn current(&self) -> Arc<MetricWindow> {
        Arc::clone(&self.window.borrow())
    }

    /// A receiver notified on every published window.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MetricWindow>> {
        self.window.clone()
    }

    /// Skip timer ticks until [`FeedHandle::resume`].
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    /// Flip the paused flag; returns true when the feed is now paused.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Request an immediate advance. Returns false once the task has ended.
    pub fn advance_now(&self) -> bool {
        self.commands.send(FeedCommand::AdvanceNow).is_ok()
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.commands.send(FeedCommand::Stop);
        let _ = self.task.await;
    }
}

async fn run_feed(
    mut sim: MetricSimulator,
    mut current: Arc<MetricWindow>,
    interval: Duration,
    window_tx: watch::Sender<Arc<MetricWindow>>,
    mut commands: mpsc::UnboundedReceiver<FeedCommand>,
    paused: Arc<AtomicBool>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if paused.load(Ordering::Relaxed) {
                    continue;
                }
                current = publish_next(&mut sim, &current, &window_tx);
            }
            cmd = commands.recv() => match cmd {
                Some(FeedCommand::AdvanceNow) => {
                    current = publish_next(&mut sim, &current, &window_tx);
                }
                Some(FeedCommand::Stop) | None => break,
            },
        }
    }

    log::info!("metric feed stopped at generation {}", current.generation());
}

fn publish_next(
    sim: &mut MetricSimulator,
    current: &MetricWindow,
    window_tx: &watch::Sender<Arc<MetricWindow>>,
) -> Arc<MetricWindow> {
    let next = Arc::new(current.advance(sim));
    log::trace!(
        "tick {}: connections {:?}",
        next.generation(),
        next.latest().map(|r| r.connections)
    );
    window_tx.send_replace(Arc::clone(&next));
    next
}
