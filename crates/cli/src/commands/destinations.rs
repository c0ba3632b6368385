//! Lists the configured destinations in posting order.

use std::path::Path;

use anyhow::Result;

pub fn execute(config_path: &Path, destinations_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path, destinations_path)?;

    if config.destinations.is_empty() {
        println!("No destinations configured.");
        return Ok(());
    }

    println!("{:<4} {:<22} {:<22} ADDRESS", "#", "SERVER", "CHANNEL");
    println!("{}", "-".repeat(80));

    for (index, dest) in config.destinations.iter().enumerate() {
        println!(
            "{:<4} {:<22} {:<22} {}",
            index + 1,
            dest.server_id,
            dest.channel_id,
            dest.address(&config.session.base_url)
        );
    }

    println!();
    println!("Total: {} destinations", config.destinations.len());
    Ok(())
}
