//! Encode one broadcast cycle and print each frame as hex.
//!
//! Run with `cargo run --example encode_cycle`.

use std::time::Duration;

use mavsim::protocol::verify;
use mavsim::simulator::Scenario;
use mavsim::Encoder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("mavsim frame dump");
    println!("=================\n");

    let scenario = Scenario::default();
    let mut encoder = Encoder::new(1, 1);

    for record in scenario.snapshot(Duration::from_secs(1_700_000_000), Duration::from_secs(42)) {
        let message = encoder.encode_telemetry(&record)?;
        let kind = verify(message.as_bytes())?;

        let hex: Vec<String> = message
            .as_bytes()
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect();
        println!(
            "seq={:<3} {:<11} {:>2} bytes  {}",
            message.sequence(),
            kind,
            message.len(),
            scenario.describe(&record)
        );
        println!("    {}\n", hex.join(" "));
    }

    Ok(())
}
