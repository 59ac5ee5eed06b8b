//! Randomness sources for the metrics simulator.
//!
//! Every random draw the simulator makes goes through the [`JitterSource`]
//! trait, which hands out uniform reals in `[0, 1)`. Integer draws are derived
//! from them as `floor(u * width) + low`, so a scripted source controls the
//! whole chain of generated records.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplier of uniform draws in `[0, 1)`.
pub trait JitterSource: Send {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[low, low + width)`.
    fn next_int(&mut self, low: i64, width: u32) -> i64 {
        let u = self.next_unit();
        low + (u * f64::from(width)).floor() as i64
    }

    /// Uniform real in `[base, base + span)`.
    fn next_real(&mut self, base: f64, span: f64) -> f64 {
        base + self.next_unit() * span
    }
}

/// OS-seeded thread-local RNG. The default for live dashboards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadJitter;

impl JitterSource for ThreadJitter {
    fn next_unit(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Deterministic RNG seeded from a `u64`; same seed, same metrics.
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for SeededJitter {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Returns the same value on every draw.
///
/// `FixedJitter::new(0.4)` yields a connection delta of 0; `0.0` yields the
/// most negative delta of the default range.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter {
    value: f64,
}

impl FixedJitter {
    /// Values outside `[0, 1)` are clamped into it.
    pub fn new(value: f64) -> Self {
        Self {
            value: clamp_unit(value),
        }
    }
}

impl JitterSource for FixedJitter {
    fn next_unit(&mut self) -> f64 {
        self.value
    }
}

/// Replays a fixed sequence of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedJitter {
    values: Vec<f64>,
    pos: usize,
}

impl ScriptedJitter {
    /// An empty script behaves like `FixedJitter::new(0.0)`.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into_iter().map(clamp_unit).collect(),
            pos: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl JitterSource for ScriptedJitter {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.pos += 1;
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

/// Largest `f64` strictly below 1.0.
const UNIT_MAX: f64 = 1.0 - f64::EPSILON / 2.0;

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, UNIT_MAX) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_jitter_in_unit_interval() {
        let mut j = ThreadJitter;
        for _ in 0..10_000 {
            let u = j.next_unit();
            assert!((0.0..1.0).contains(&u), "out of range: {u}");
        }
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let mut a = SeededJitter::new(42);
        let mut b = SeededJitter::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn seeded_jitter_differs_across_seeds() {
        let mut a = SeededJitter::new(1);
        let mut b = SeededJitter::new(2);
        let xs: Vec<f64> = (0..8).map(|_| a.next_unit()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.next_unit()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn next_int_covers_both_ends() {
        assert_eq!(FixedJitter::new(0.0).next_int(-8, 20), -8);
        assert_eq!(FixedJitter::new(0.999_999).next_int(-8, 20), 11);
        assert_eq!(FixedJitter::new(0.4).next_int(-8, 20), 0);
    }

    #[test]
    fn next_real_is_offset_and_scaled() {
        let mut j = FixedJitter::new(0.5);
        assert!((j.next_real(25.4, 5.0) - 27.9).abs() < 1e-12);
    }

    #[test]
    fn fixed_jitter_clamps_out_of_range() {
        assert_eq!(FixedJitter::new(-3.0).next_unit(), 0.0);
        let hi = FixedJitter::new(7.0).next_unit();
        assert!(hi < 1.0);
        assert_eq!(FixedJitter::new(f64::NAN).next_unit(), 0.0);
    }

    #[test]
    fn clamped_one_still_floors_below_width() {
        // A draw of "1.0" must never produce the excluded upper bound.
        assert_eq!(FixedJitter::new(1.0).next_int(0, 500), 499);
    }

    #[test]
    fn scripted_jitter_replays_and_wraps() {
        let mut j = ScriptedJitter::new(vec![0.1, 0.2, 0.3]);
        let got: Vec<f64> = (0..5).map(|_| j.next_unit()).collect();
        assert_eq!(got, vec![0.1, 0.2, 0.3, 0.1, 0.2]);
        assert_eq!(j.draws(), 5);
    }

    #[test]
    fn empty_script_yields_zero() {
        let mut j = ScriptedJitter::new(vec![]);
        assert_eq!(j.next_unit(), 0.0);
        assert_eq!(j.draws(), 1);
    }
}
