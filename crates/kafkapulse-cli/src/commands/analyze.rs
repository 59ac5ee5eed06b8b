use super::{AiArgs, FeedArgs};
use kafkapulse_assistant::prompt;

pub fn run(feed_args: &FeedArgs, ai_args: &AiArgs, show_metrics: bool) {
    let window = super::initial_window(feed_args);
    let assistant = super::make_assistant(ai_args);

    if show_metrics {
        println!("{}", prompt::metric_lines(&window));
        println!();
    }

    let trend = window.trend();
    if let Some(latest) = window.latest() {
        let arrow = if trend.display_percent() >= 0.0 { '↑' } else { '↓' };
        println!(
            "Active connections: {}  {arrow} {:.1}% vs previous",
            latest.connections,
            trend.display_percent().abs()
        );
        println!();
    }

    let rt = super::runtime();
    let summary = rt.block_on(assistant.summarize(&window));
    println!("{summary}");
}
