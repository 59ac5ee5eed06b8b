//! Prompt text sent to the model.

use kafkapulse_core::{ChatMessage, MetricRecord, MetricWindow};

pub const SUMMARY_SYSTEM_INSTRUCTION: &str = "You are an expert Kafka SRE analyst specialized in Confluent Cloud infrastructure. You provide deep technical insights into connection patterns and cluster health.";

pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are an assistant for a Kafka monitoring dashboard. Help the user understand their cluster's active connection count and related performance metrics.";

/// One line per record, oldest first.
pub fn metric_lines(window: &MetricWindow) -> String {
    window
        .records()
        .map(|r| {
            format!(
                "Time: {}, Connections: {}, ReqRate: {}",
                r.timestamp, r.connections, r.request_rate
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn summary_prompt(window: &MetricWindow) -> String {
    format!(
        "Analyze the following Kafka connection metrics and provide a brief technical summary. \
Look for patterns, potential bottlenecks, or anomalies in the active connection count.\n\n\
Metrics:\n{}\n\n\
Provide your response in Markdown format. Keep it concise and professional.",
        metric_lines(window)
    )
}

/// Prompt for the newest message in `history`, with `latest` as JSON
/// (`null` when there is no record yet).
pub fn chat_prompt(history: &[ChatMessage], latest: Option<&MetricRecord>) -> Option<String> {
    let question = history.last()?;
    let snapshot = serde_json::to_string(&latest).unwrap_or_else(|_| "null".to_string());
    Some(format!(
        "User question: {}\nLatest Metric Snapshot: {}\n\nRespond based on the context of these Kafka metrics.",
        question.content, snapshot
    ))
}
