pub mod analyze;
pub mod ask;
pub mod monitor;
pub mod server;
pub mod snapshot;

use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use kafkapulse_assistant::{Assistant, AssistantConfig, GeminiClient, config};
use kafkapulse_core::{
    ClusterInfo, ClusterStatus, FeedConfig, MetricSimulator, MetricWindow, SeededJitter,
};

/// Simulation options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    /// Seed the generator for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of records kept in the window
    #[arg(long, default_value = "20")]
    pub window_size: usize,

    /// Milliseconds between ticks
    #[arg(long, default_value = "5000", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,
}

/// Overrides for the cluster shown in the header.
#[derive(Args, Debug, Clone, Default)]
pub struct ClusterArgs {
    /// Cluster id (default: lkc-p8y3q7)
    #[arg(long)]
    pub cluster_id: Option<String>,

    /// Cluster display name (default: Production-Primary)
    #[arg(long)]
    pub cluster_name: Option<String>,

    /// Cloud region (default: us-east-1)
    #[arg(long)]
    pub region: Option<String>,

    /// Cloud provider (default: AWS)
    #[arg(long)]
    pub provider: Option<String>,

    /// Cluster status: up, down, degraded (default: up)
    #[arg(long)]
    pub status: Option<ClusterStatus>,
}

/// AI collaborator options.
#[derive(Args, Debug, Clone)]
pub struct AiArgs {
    /// API key for the Generative Language API (falls back to API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long, env = "KAFKAPULSE_MODEL", default_value = config::DEFAULT_MODEL)]
    pub model: String,

    /// API root URL
    #[arg(long, default_value = config::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,
}

/// Seeded simulator when a seed is given, OS randomness otherwise.
pub fn make_simulator(seed: Option<u64>) -> MetricSimulator {
    match seed {
        Some(seed) => MetricSimulator::with_jitter(Box::new(SeededJitter::new(seed))),
        None => MetricSimulator::new(),
    }
}

pub fn feed_config(args: &FeedArgs) -> FeedConfig {
    FeedConfig {
        window_size: args.window_size,
        interval: Duration::from_millis(args.interval_ms.max(1)),
    }
}

/// A window initialized the same way the live feed starts.
pub fn initial_window(args: &FeedArgs) -> MetricWindow {
    let mut sim = make_simulator(args.seed);
    MetricWindow::initialize(&mut sim, args.window_size)
}

pub fn make_cluster(args: &ClusterArgs) -> ClusterInfo {
    let mut cluster = ClusterInfo::default();
    if let Some(id) = &args.cluster_id {
        cluster.id = id.clone();
    }
    if let Some(name) = &args.cluster_name {
        cluster.name = name.clone();
    }
    if let Some(region) = &args.region {
        cluster.region = region.clone();
    }
    if let Some(provider) = &args.provider {
        cluster.provider = provider.clone();
    }
    if let Some(status) = args.status {
        cluster.status = status;
    }
    cluster
}

/// Environment config with command-line values layered on top.
pub fn assistant_config(args: &AiArgs) -> AssistantConfig {
    assistant_config_over(AssistantConfig::from_env(), args)
}

fn assistant_config_over(base: AssistantConfig, args: &AiArgs) -> AssistantConfig {
    let mut config = base
        .with_model(args.model.clone())
        .with_endpoint(args.endpoint.clone());
    if let Some(key) = &args.api_key {
        config = config.with_api_key(key.clone());
    }
    config.timeout = Duration::from_secs(args.timeout_secs.max(1));
    config
}

/// Build the Gemini-backed assistant, or exit with a message.
///
/// A missing key is not fatal: every call then returns its fallback text.
pub fn make_assistant(args: &AiArgs) -> Assistant {
    let config = assistant_config(args);
    if !config.has_api_key() {
        eprintln!("Warning: no API key (set GEMINI_API_KEY); AI answers will be fallbacks");
    }
    match GeminiClient::new(config) {
        Ok(client) => Assistant::new(Arc::new(client)),
        Err(e) => {
            eprintln!("Failed to create AI client: {e}");
            std::process::exit(1);
        }
    }
}

/// Multi-threaded runtime; exits the process if it cannot start.
pub fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    }
}
