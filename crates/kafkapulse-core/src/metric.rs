//! A single observation of cluster connection metrics.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One metrics record, produced once per tick.
///
/// Records are immutable values: the window replaces them, it never edits
/// them. The JSON shape uses camelCase keys (`requestRate`, `bytesIn`,
/// `bytesOut`) so snapshots read the same everywhere they are shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// `<M/D/YYYY> <H>:<M>:<S>` at generation time, no zero padding.
    pub timestamp: String,
    /// Active connections. Random walk, floored at zero.
    pub connections: u64,
    /// Requests per second.
    pub request_rate: u64,
    /// Inbound throughput in MB/s.
    pub bytes_in: f64,
    /// Outbound throughput in MB/s.
    pub bytes_out: f64,
}

impl MetricRecord {
    /// The all-zero record used when there is nothing to show yet.
    pub fn zero() -> Self {
        Self {
            timestamp: String::new(),
            connections: 0,
            request_rate: 0,
            bytes_in: 0.0,
            bytes_out: 0.0,
        }
    }

    /// Date token of the timestamp.
    pub fn date_part(&self) -> &str {
        self.timestamp.split(' ').next().unwrap_or("")
    }

    /// Clock token of the timestamp (`H:M:S`), used for chart axis labels.
    pub fn clock_part(&self) -> &str {
        clock_part(&self.timestamp)
    }
}

/// Format a wall-clock instant as `M/D/YYYY H:M:S` without zero padding.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%-m/%-d/%Y %-H:%-M:%-S").to_string()
}

/// Second space-delimited token of a record timestamp, or `""`.
pub fn clock_part(timestamp: &str) -> &str {
    timestamp.split(' ').nth(1).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn timestamp_is_not_zero_padded() {
        assert_eq!(format_timestamp(at(9, 5, 3)), "3/7/2024 9:5:3");
    }

    #[test]
    fn timestamp_keeps_two_digit_fields() {
        assert_eq!(format_timestamp(at(23, 59, 10)), "3/7/2024 23:59:10");
    }

    #[test]
    fn timestamp_splits_into_date_and_clock() {
        let record = MetricRecord {
            timestamp: format_timestamp(at(14, 2, 45)),
            ..MetricRecord::zero()
        };
        assert_eq!(record.date_part(), "3/7/2024");
        assert_eq!(record.clock_part(), "14:2:45");
        let fields: Vec<&str> = record.clock_part().split(':').collect();
        assert_eq!(fields, vec!["14", "2", "45"]);
    }

    #[test]
    fn clock_part_of_malformed_timestamp_is_empty() {
        assert_eq!(clock_part(""), "");
        assert_eq!(clock_part("nospace"), "");
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let record = MetricRecord {
            timestamp: "1/2/2024 3:4:5".into(),
            connections: 840,
            request_rate: 1600,
            bytes_in: 26.5,
            bytes_out: 19.0,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["connections"], 840);
        assert_eq!(json["requestRate"], 1600);
        assert_eq!(json["bytesIn"], 26.5);
        assert_eq!(json["bytesOut"], 19.0);
        assert!(json.get("request_rate").is_none());
    }

    #[test]
    fn zero_record_is_all_zero() {
        let z = MetricRecord::zero();
        assert_eq!(z.connections, 0);
        assert_eq!(z.request_rate, 0);
        assert_eq!(z.bytes_in, 0.0);
        assert_eq!(z.bytes_out, 0.0);
    }
}
