//! Random-walk metric generator.
//!
//! Each record takes exactly four draws from the jitter source, in this
//! order: connection delta, request rate, bytes in, bytes out. Only the
//! connection count depends on the previous record; the other three fields
//! are fresh noise on every call.

use chrono::{Local, NaiveDateTime};

use crate::jitter::{JitterSource, ThreadJitter};
use crate::metric::{MetricRecord, format_timestamp};

/// Shape of the generated signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorParams {
    /// Connection count used when there is no previous record.
    pub baseline_connections: u64,
    /// Smallest connection delta per step (inclusive).
    pub delta_low: i64,
    /// Number of distinct deltas; the largest is `delta_low + delta_width - 1`.
    pub delta_width: u32,
    pub request_rate_base: u64,
    /// Request rate lies in `[base, base + span)`.
    pub request_rate_span: u32,
    pub bytes_in_base: f64,
    pub bytes_in_span: f64,
    pub bytes_out_base: f64,
    pub bytes_out_span: f64,
}

impl Default for SimulatorParams {
    fn default() -> Self {
        Self {
            baseline_connections: 840,
            delta_low: -8,
            delta_width: 20,
            request_rate_base: 1500,
            request_rate_span: 500,
            bytes_in_base: 25.4,
            bytes_in_span: 5.0,
            bytes_out_base: 18.2,
            bytes_out_span: 4.0,
        }
    }
}

impl SimulatorParams {
    /// Inclusive range of connection deltas.
    pub fn delta_range(&self) -> (i64, i64) {
        (
            self.delta_low,
            self.delta_low + i64::from(self.delta_width) - 1,
        )
    }
}

/// Generates metric records from a jitter source.
pub struct MetricSimulator {
    jitter: Box<dyn JitterSource>,
    params: SimulatorParams,
}

impl Default for MetricSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSimulator {
    /// Default parameters, OS-seeded randomness.
    pub fn new() -> Self {
        Self::with_jitter(Box::new(ThreadJitter))
    }

    pub fn with_jitter(jitter: Box<dyn JitterSource>) -> Self {
        Self::with_params(jitter, SimulatorParams::default())
    }

    pub fn with_params(jitter: Box<dyn JitterSource>, params: SimulatorParams) -> Self {
        Self { jitter, params }
    }

    pub fn params(&self) -> &SimulatorParams {
        &self.params
    }

    /// Next record, stamped with the local wall clock.
    pub fn generate_next(&mut self, previous: Option<&MetricRecord>) -> MetricRecord {
        self.generate_next_at(previous, Local::now().naive_local())
    }

    /// Next record, stamped with `at`.
    ///
    /// The connection count steps from `previous` (or the baseline) by a
    /// delta in [`SimulatorParams::delta_range`] and is floored at zero.
    pub fn generate_next_at(
        &mut self,
        previous: Option<&MetricRecord>,
        at: NaiveDateTime,
    ) -> MetricRecord {
        let p = self.params;
        let base = previous.map_or(p.baseline_connections, |r| r.connections);

        let delta = self.jitter.next_int(p.delta_low, p.delta_width);
        let connections = step_connections(base, delta);

        let request_rate =
            p.request_rate_base + self.jitter.next_int(0, p.request_rate_span) as u64;
        let bytes_in = self.jitter.next_real(p.bytes_in_base, p.bytes_in_span);
        let bytes_out = self.jitter.next_real(p.bytes_out_base, p.bytes_out_span);

        MetricRecord {
            timestamp: format_timestamp(at),
            connections,
            request_rate,
            bytes_in,
            bytes_out,
        }
    }
}

/// `max(0, base + delta)` without overflow.
fn step_connections(base: u64, delta: i64) -> u64 {
    if delta >= 0 {
        base.saturating_add(delta as u64)
    } else {
        base.saturating_sub(delta.unsigned_abs())
    }
}
