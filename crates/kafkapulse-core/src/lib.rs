//! # kafkapulse-core
//!
//! **Live-looking broker connection metrics without a broker.**
//!
//! `kafkapulse-core` simulates the connection metrics of a message-broker
//! cluster. A bounded random walk drives the active connection count while
//! request rate and throughput are fresh noise on every tick. Records live in
//! a fixed-size rolling window that a single timer task advances.
//!
//! ## Quick Start
//!
//! ```no_run
//! use kafkapulse_core::{MetricSimulator, MetricWindow};
//!
//! let mut sim = MetricSimulator::new();
//! let window = MetricWindow::initialize(&mut sim, 20);
//! assert_eq!(window.len(), 20);
//!
//! // One tick: the oldest record falls off, a derived one is appended.
//! let window = window.advance(&mut sim);
//! println!("{:+.1}% vs previous", window.trend().display_percent());
//! ```
//!
//! ## Architecture
//!
//! Jitter source → Simulator → Window → Feed (watch channel) → readers
//!
//! Every random draw comes from a [`JitterSource`], so the whole chain is
//! reproducible with a [`FixedJitter`], [`ScriptedJitter`] or [`SeededJitter`].
//! The [`MetricFeed`] owns the window and publishes each new one as an
//! `Arc<MetricWindow>`; readers never observe a half-updated window.

pub mod chat;
pub mod cluster;
pub mod feed;
pub mod jitter;
pub mod metric;
pub mod simulator;
pub mod snapshot;
pub mod trend;
pub mod window;

pub use chat::{ChatMessage, ChatRole, Transcript};
pub use cluster::{ClusterInfo, ClusterStatus};
pub use feed::{DEFAULT_TICK_INTERVAL, FeedCommand, FeedConfig, FeedHandle, MetricFeed};
pub use jitter::{FixedJitter, JitterSource, ScriptedJitter, SeededJitter, ThreadJitter};
pub use metric::{MetricRecord, clock_part, format_timestamp};
pub use simulator::{MetricSimulator, SimulatorParams};
pub use snapshot::DashboardSnapshot;
pub use trend::{ConnectionTrend, round_one_decimal, trend_percent};
pub use window::{DEFAULT_WINDOW_SIZE, MetricWindow};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
