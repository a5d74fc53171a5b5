//! Training Loop Example
//!
//! Feeds a simulated validation curve into a tracker and prints the best
//! values as they improve.
//!
//! Run with: RUST_LOG=best_tracker=debug cargo run --example training_loop

use anyhow::Result;
use best_tracker::{BestValueTracker, TrackerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== best-tracker: Training Loop ===\n");

    // -------------------------------------------------------------------------
    // 1. Configure metrics (true = larger is better)
    // -------------------------------------------------------------------------
    let config = TrackerConfig::from_json(r#"{"val_loss": false, "val_auroc": true}"#)?;
    let mut tracker = BestValueTracker::new(config)?;
    println!("{tracker}\n");

    // -------------------------------------------------------------------------
    // 2. Simulated epochs: loss plateaus, AUROC peaks then overfits
    // -------------------------------------------------------------------------
    for epoch in 1..=10_u32 {
        let x = f64::from(epoch);
        let val_loss = (1.0 / x).max(0.25);
        let val_auroc = 0.95 - 0.01 * (x - 6.0).powi(2) / 2.0;

        tracker.update(&[val_loss, val_auroc], u64::from(epoch))?;
        println!(
            "epoch {epoch:>2}: val_loss={val_loss:.4} val_auroc={val_auroc:.4} \
             (best loss @ {:?}, best auroc @ {:?})",
            tracker.best_step("val_loss"),
            tracker.best_step("val_auroc"),
        );
    }

    // -------------------------------------------------------------------------
    // 3. Final summary
    // -------------------------------------------------------------------------
    println!("\n{tracker}");
    println!("\nSnapshot JSON:\n{}", tracker.snapshot().to_json()?);

    Ok(())
}
