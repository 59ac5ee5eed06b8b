use super::{AiArgs, ClusterArgs, FeedArgs};
use kafkapulse_core::MetricFeed;
use kafkapulse_server::AppState;

pub fn run(
    host: &str,
    port: u16,
    feed_args: &FeedArgs,
    cluster_args: &ClusterArgs,
    ai_args: &AiArgs,
) {
    let rt = super::runtime();
    let assistant = super::make_assistant(ai_args);
    let cluster = super::make_cluster(cluster_args);
    let base = format!("http://{host}:{port}");

    println!("KafkaPulse Server v{}", kafkapulse_core::VERSION);
    println!("   {base}");
    println!("   cluster {} [{}]", cluster.label(), cluster.status);
    println!(
        "   {} records, tick every {} ms, model {}",
        feed_args.window_size,
        feed_args.interval_ms,
        assistant.model()
    );
    println!();
    println!("   Endpoints:");
    println!("     GET  /                API index (try: curl {base})");
    println!("     GET  /health          Health check with current tick");
    println!("     GET  /cluster         Cluster metadata");
    println!("     GET  /metrics         Current window with trend");
    println!("     GET  /metrics/latest  Newest record with trend");
    println!("     POST /analysis        AI summary of the current window");
    println!("     POST /chat            Ask the assistant ({{\"history\": [...]}})");
    println!();

    let result = rt.block_on(async {
        let feed = MetricFeed::spawn(
            super::make_simulator(feed_args.seed),
            super::feed_config(feed_args),
        );
        let state = AppState::new(feed.subscribe(), cluster, assistant);
        let served = kafkapulse_server::run_server(state, host, port).await;
        feed.shutdown().await;
        served
    });

    if let Err(e) = result {
        eprintln!("Server error on {base}: {e}");
        std::process::exit(1);
    }
}
