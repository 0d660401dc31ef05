//! Confidence intervals for a two-candidate poll
//!
//! Compares exact and CLT intervals for several poll sizes, then shows how
//! the Wald interval breaks down for a long-shot candidate.
//!
//! Run with `RUST_LOG=debug` to see root-finder output.

use anyhow::Result;
use mcstat_confidence::{binomial_coverage, BinomialCI};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ci = BinomialCI::new(0.05)?;

    println!("=== Poll results, 52% support ===");
    for n in [100u64, 1_000, 10_000] {
        let result = ci.interval(n, n * 52 / 100)?;
        println!("n = {:>6}  exact {}  clt {}", n, result.exact, result.clt);
    }

    println!("\n=== Long-shot candidate, true support 1% ===");
    let mut rng = StdRng::seed_from_u64(2016);
    for n in [20u64, 200, 2_000] {
        let coverage = binomial_coverage(&ci, 0.01, n, 2_000, &mut rng)?;
        println!(
            "n = {:>5}  exact coverage {:.3}  clt coverage {:.3}",
            n,
            coverage.exact_rate(),
            coverage.clt_rate()
        );
    }

    let raw = ci.unclipped().clt(20, 1)?;
    println!("\nUnclipped Wald interval for 1/20: [{:.4}, {:.4}]", raw.lower, raw.upper);

    Ok(())
}
