//! Benchmark harness: samples random strings at increasing lengths and
//! reports each algorithm's mean grammar size and mean running time.
//!
//! Mirrors `algorithmAsymptoticPerformance` from the original Python
//! reference implementation, with the brute-force Exhaustive algorithm
//! opt-in only (its candidate count grows with the Catalan numbers).

use crate::error::Result;
use crate::grammar::Grammar;
use rand::Rng;
use std::time::Instant;

/// A named algorithm entry point, for driving the sweep generically.
#[derive(Clone, Copy)]
pub struct Algorithm {
    pub name: &'static str,
    pub run: fn(&str) -> Result<Grammar>,
}

/// The four algorithms this crate implements, in the order the
/// benchmark table presents them.
pub fn all_algorithms() -> Vec<Algorithm> {
    vec![
        Algorithm {
            name: "bisection",
            run: crate::bisection::bisection_grammar,
        },
        Algorithm {
            name: "lehman1",
            run: crate::lehman1::lehman1_grammar,
        },
        Algorithm {
            name: "sakamoto",
            run: crate::sakamoto::sakamoto_grammar,
        },
        Algorithm {
            name: "exhaustive",
            run: crate::exhaustive::exhaustive_grammar,
        },
    ]
}

/// A uniformly random string of length `n` drawn from `alphabet`.
pub fn random_string(rng: &mut impl Rng, n: usize, alphabet: &[char]) -> String {
    (0..n)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Mean grammar size and mean wall-clock time (in milliseconds) for one
/// algorithm at one string length, averaged over `samples` random draws.
#[derive(Debug, Clone, Copy)]
pub struct SweepPoint {
    pub string_length: usize,
    pub mean_grammar_size: f64,
    pub mean_time_ms: f64,
}

/// Runs `algorithm` over `samples` random strings at each length in
/// `lengths`, returning one [`SweepPoint`] per length.
///
/// Strings that fail to produce a grammar (only possible for empty
/// input, which this never generates for `n >= 1`) are skipped.
pub fn size_sweep(
    algorithm: &Algorithm,
    lengths: impl IntoIterator<Item = usize>,
    samples: usize,
    alphabet: &[char],
    rng: &mut impl Rng,
) -> Vec<SweepPoint> {
    lengths
        .into_iter()
        .map(|n| {
            let mut total_size = 0usize;
            let mut total_nanos = 0u128;
            let mut completed = 0usize;
            for _ in 0..samples {
                let s = random_string(rng, n, alphabet);
                let start = Instant::now();
                let result = (algorithm.run)(&s);
                let elapsed = start.elapsed();
                if let Ok(grammar) = result {
                    total_size += grammar.size();
                    total_nanos += elapsed.as_nanos();
                    completed += 1;
                }
            }
            let completed = completed.max(1);
            SweepPoint {
                string_length: n,
                mean_grammar_size: total_size as f64 / completed as f64,
                mean_time_ms: (total_nanos as f64 / completed as f64) / 1_000_000.0,
            }
        })
        .collect()
}
