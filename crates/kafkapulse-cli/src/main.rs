//! CLI for kafkapulse: a live broker connection dashboard.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

use commands::{AiArgs, ClusterArgs, FeedArgs};

#[derive(Parser)]
#[command(name = "kafkapulse")]
#[command(about = "kafkapulse: live broker connection metrics with an AI analyst")]
#[command(version = kafkapulse_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live interactive dashboard (TUI)
    Monitor {
        /// Directory for snapshots exported with `s`
        #[arg(long, default_value = ".")]
        export_dir: String,

        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        cluster: ClusterArgs,

        #[command(flatten)]
        ai: AiArgs,
    },

    /// Serve the live metrics and AI endpoints over HTTP
    Server {
        /// Port to listen on
        #[arg(long, default_value = "8420")]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        cluster: ClusterArgs,

        #[command(flatten)]
        ai: AiArgs,
    },

    /// Print a freshly initialized metric window as JSON
    Snapshot {
        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        cluster: ClusterArgs,

        /// Also write kafkapulse-snapshot-<epoch>.json into this directory
        #[arg(long)]
        out_dir: Option<String>,
    },

    /// One-shot AI summary of a freshly initialized window
    Analyze {
        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        ai: AiArgs,

        /// Print the metric lines sent to the model before the summary
        #[arg(long)]
        show_metrics: bool,
    },

    /// Ask the AI assistant a question about the current metrics
    Ask {
        /// The question
        question: String,

        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        ai: AiArgs,
    },
}

/// The dashboard owns the terminal, so it logs nothing unless RUST_LOG asks.
fn default_log_filter(command: &Commands) -> &'static str {
    match command {
        Commands::Monitor { .. } => "off",
        Commands::Server { .. } => "info",
        _ => "warn",
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(&cli.command)),
    )
    .init();

    match cli.command {
        Commands::Monitor {
            export_dir,
            feed,
            cluster,
            ai,
        } => commands::monitor::run(&feed, &cluster, &ai, &export_dir),
        Commands::Server {
            port,
            host,
            feed,
            cluster,
            ai,
        } => commands::server::run(&host, port, &feed, &cluster, &ai),
        Commands::Snapshot {
            feed,
            cluster,
            out_dir,
        } => commands::snapshot::run(&feed, &cluster, out_dir.as_deref()),
        Commands::Analyze {
            feed,
            ai,
            show_metrics,
        } => commands::analyze::run(&feed, &ai, show_metrics),
        Commands::Ask { question, feed, ai } => commands::ask::run(&question, &feed, &ai),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn monitor_defaults() {
        let cli = Cli::try_parse_from(["kafkapulse", "monitor"]).unwrap();
        match cli.command {
            Commands::Monitor { feed, cluster, .. } => {
                assert_eq!(feed.window_size, 20);
                assert_eq!(feed.interval_ms, 5000);
                assert!(feed.seed.is_none());
                assert!(cluster.status.is_none());
            }
            _ => panic!("expected monitor"),
        }
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Cli::try_parse_from(["kafkapulse", "monitor", "--interval-ms", "0"]).is_err());
    }

    #[test]
    fn ask_takes_question_and_seed() {
        let cli = Cli::try_parse_from([
            "kafkapulse",
            "ask",
            "why so many connections?",
            "--seed",
            "7",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask { question, feed, .. } => {
                assert_eq!(question, "why so many connections?");
                assert_eq!(feed.seed, Some(7));
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn log_filter_silences_dashboard() {
        let cli = Cli::try_parse_from(["kafkapulse", "monitor"]).unwrap();
        assert_eq!(default_log_filter(&cli.command), "off");
        let cli = Cli::try_parse_from(["kafkapulse", "server"]).unwrap();
        assert_eq!(default_log_filter(&cli.command), "info");
    }
}
