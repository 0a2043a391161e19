//! `sgp-bench`: drives the asymptotic-performance sweep over the smallest
//! grammar problem approximation algorithms and prints the results as
//! tables, mirroring the original Python reference's `__main__` block.

use clap::{Parser, ValueEnum};
use comfy_table::Table;
use grammar_approx::bench::{all_algorithms, size_sweep};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum AlgorithmName {
    Bisection,
    Lehman1,
    Sakamoto,
    Exhaustive,
}

impl AlgorithmName {
    fn matches(self, name: &str) -> bool {
        let label = match self {
            AlgorithmName::Bisection => "bisection",
            AlgorithmName::Lehman1 => "lehman1",
            AlgorithmName::Sakamoto => "sakamoto",
            AlgorithmName::Exhaustive => "exhaustive",
        };
        label == name
    }
}

/// Sweeps random-string grammar sizes and timings across increasing
/// string lengths for each selected approximation algorithm.
#[derive(Debug, Parser)]
#[command(name = "sgp-bench", about = "Smallest grammar problem benchmark harness")]
struct Args {
    /// Smallest string length to sample.
    #[arg(long, default_value_t = 10)]
    min: usize,

    /// Largest string length to sample.
    #[arg(long, default_value_t = 200)]
    max: usize,

    /// Step between sampled string lengths.
    #[arg(long, default_value_t = 10)]
    step: usize,

    /// Random strings sampled per length, averaged over.
    #[arg(long, default_value_t = 10)]
    samples: usize,

    /// Alphabet to draw random strings from.
    #[arg(long, default_value = "abcdefghijklmnopqrstuvwxyz")]
    alphabet: String,

    /// Algorithms to include. Exhaustive is excluded unless named
    /// explicitly: its candidate count grows with the Catalan numbers.
    #[arg(long, value_enum, num_args = 1.., default_values_t = [AlgorithmName::Bisection, AlgorithmName::Lehman1, AlgorithmName::Sakamoto])]
    algorithms: Vec<AlgorithmName>,

    /// Seed for the random string generator, for reproducible sweeps.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let alphabet: Vec<char> = args.alphabet.chars().collect();
    let lengths: Vec<usize> = (args.min..=args.max).step_by(args.step.max(1)).collect();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let selected: Vec<_> = all_algorithms()
        .into_iter()
        .filter(|a| args.algorithms.iter().any(|name| name.matches(a.name)))
        .collect();

    let mut results = Vec::new();
    for algorithm in &selected {
        log::info!("running sweep for {}", algorithm.name);
        let points = size_sweep(algorithm, lengths.iter().copied(), args.samples, &alphabet, &mut rng);
        results.push((algorithm.name, points));
    }

    let mut size_table = Table::new();
    let mut header = vec!["string length".to_string()];
    header.extend(results.iter().map(|(name, _)| name.to_string()));
    size_table.set_header(header);
    for (i, n) in lengths.iter().enumerate() {
        let mut row = vec![n.to_string()];
        for (_, points) in &results {
            row.push(format!("{:.1}", points[i].mean_grammar_size));
        }
        size_table.add_row(row);
    }
    println!("Grammar sizes:");
    println!("{size_table}");

    let mut time_table = Table::new();
    let mut header = vec!["string length".to_string()];
    header.extend(results.iter().map(|(name, _)| name.to_string()));
    time_table.set_header(header);
    for (i, n) in lengths.iter().enumerate() {
        let mut row = vec![n.to_string()];
        for (_, points) in &results {
            row.push(format!("{:.2}", points[i].mean_time_ms));
        }
        time_table.add_row(row);
    }
    println!("\nTime taken (ms):");
    println!("{time_table}");
}
