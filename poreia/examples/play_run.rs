//! Automated Run Walkthrough
//!
//! This example demonstrates:
//! - Driving a whole run through the RunContext surface
//! - The select -> dispatch -> mark_cleared handshake with a round dispatcher
//! - Phase transitions from NotStarted to Cleared
//!
//! A stand-in "dispatcher" picks a random offered node each round and always
//! wins, which is exactly the call pattern a UI host produces.
//!
//! ## Run with
//! ```bash
//! cargo run --example play_run -- 7
//! ```

use poreia::{GeneratorConfig, RunContext, RunPhase};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(7);

    let mut run = RunContext::generate(GeneratorConfig::default(), seed)?;
    let mut rng = StdRng::seed_from_u64(seed ^ 0xA5A5);
    println!("new run on seed {seed} ({} nodes)\n", run.graph().len());

    let mut round = 0;
    while run.phase() != RunPhase::Cleared {
        let offered = run.selectable()?;
        let pick = offered[rng.gen_range(0..offered.len())];
        let request = run.select(pick)?;

        round += 1;
        println!(
            "round {round:>2}: entered node {} ({}){}",
            request.node,
            request.kind,
            if request.is_boss { " - boss fight!" } else { "" }
        );

        // The excluded dispatcher would resolve the round here; we just win.
        run.mark_cleared(request.node)?;
    }

    println!("\nrun cleared in {round} rounds");
    Ok(())
}
