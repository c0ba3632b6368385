//! The posting run command.

use std::io::Read;
use std::path::Path;

use adpost::{AdContent, PostError, Poster, REPORT_CHUNK_SIZE, chunk};
use anyhow::{Context, Result};
use tracing::info;

pub async fn execute(
    config_path: &Path,
    destinations_path: Option<&Path>,
    content_path: Option<&Path>,
) -> Result<()> {
    let config = super::load_config(config_path, destinations_path)?;
    let content = read_content(content_path)?;

    info!(
        target = "adpost",
        destinations = config.destinations.len(),
        "starting posting run"
    );

    let poster = Poster::new();
    match poster.run(&config, &content).await {
        Ok(sent) => {
            report(&sent, config.destinations.len());
            Ok(())
        }
        Err(PostError::AlreadyRunning) => {
            println!("A posting run is already in progress; wait for it to finish and try again.");
            Ok(())
        }
        Err(err) => Err(err).context("posting run failed to start"),
    }
}

fn read_content(path: Option<&Path>) -> Result<AdContent> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading content from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading content from stdin")?;
            buf
        }
    };

    Ok(AdContent::new(text.trim_end_matches('\n')))
}

/// One output block per report chunk, then a summary line.
fn report(sent: &[String], attempted: usize) {
    if sent.is_empty() {
        println!("No destinations were posted to ({attempted} attempted).");
        return;
    }

    let groups = chunk(sent, REPORT_CHUNK_SIZE);
    let total = groups.len();

    for (index, group) in groups.iter().enumerate() {
        println!();
        println!("Posting complete ({}/{total}) - sent to:", index + 1);
        for address in group {
            println!("  {address}");
        }
    }

    println!();
    println!("Total: {} of {attempted} destinations", sent.len());
}
