//! Cluster a toy two-jet event with every algorithm.
//!
//! Run with: `RUST_LOG=debug cargo run --example two_jet_event`

use jetclust_core::{Algorithm, FourVector, JetFinder};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Two sprays of four tracks each, roughly back to back, plus one soft
    // wide-angle track.
    let event = [
        FourVector::massless(0.8, 0.3, 12.0),
        FourVector::massless(-0.5, 0.6, 9.0),
        FourVector::massless(0.2, -0.7, 6.5),
        FourVector::massless(-0.1, 0.1, 3.0),
        FourVector::massless(-0.6, -0.2, -11.0),
        FourVector::massless(0.4, 0.5, -8.0),
        FourVector::massless(0.3, -0.4, -7.5),
        FourVector::massless(0.0, 0.2, -2.5),
        FourVector::massless(1.5, 0.4, 0.3),
    ];

    for algorithm in Algorithm::ALL {
        let mut finder = JetFinder::new(algorithm, 0.005)?;
        finder.initialize(&event)?;
        finder.find_jets()?;
        println!(
            "{algorithm:>7} ycut={:.4}: {} jets, next merge at {:?}",
            finder.ycut(),
            finder.jet_count()?,
            finder.next_unmerged_distance()?
        );

        let outcome = finder.force_jet_count(2)?;
        println!(
            "{algorithm:>7} forced: {} jets at ycut={:.5} after {} trials",
            outcome.jet_count, outcome.ycut, outcome.trials
        );
        for jet in finder.jets()? {
            println!("        {jet}");
        }
    }
    Ok(())
}
