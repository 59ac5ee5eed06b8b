use std::path::Path;

use super::{ClusterArgs, FeedArgs};
use kafkapulse_core::DashboardSnapshot;

pub fn run(feed_args: &FeedArgs, cluster_args: &ClusterArgs, out_dir: Option<&str>) {
    let window = super::initial_window(feed_args);
    let snapshot = DashboardSnapshot::capture(&super::make_cluster(cluster_args), &window);

    match snapshot.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize snapshot: {e}");
            std::process::exit(1);
        }
    }

    if let Some(dir) = out_dir {
        match snapshot.write_to_dir(Path::new(dir)) {
            Ok(path) => eprintln!("Snapshot written to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write snapshot to {dir}: {e}");
                std::process::exit(1);
            }
        }
    }
}
