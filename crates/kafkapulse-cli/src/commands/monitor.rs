use super::{AiArgs, ClusterArgs, FeedArgs};
use kafkapulse_core::MetricFeed;

pub fn run(
    feed_args: &FeedArgs,
    cluster_args: &ClusterArgs,
    ai_args: &AiArgs,
    export_dir: &str,
) {
    let rt = super::runtime();
    let assistant = super::make_assistant(ai_args);
    let cluster = super::make_cluster(cluster_args);

    // The feed task must be spawned from inside the runtime.
    let feed = {
        let _guard = rt.enter();
        MetricFeed::spawn(
            super::make_simulator(feed_args.seed),
            super::feed_config(feed_args),
        )
    };

    let mut app = crate::tui::app::App::new(rt.handle().clone(), feed, cluster, assistant)
        .with_export_dir(export_dir);
    let result = app.run();
    let last_export = app.last_export().cloned();
    rt.block_on(app.into_feed().shutdown());

    if let Err(e) = result {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
    if let Some(path) = last_export {
        println!("Last snapshot: {}", path.display());
    }
}
