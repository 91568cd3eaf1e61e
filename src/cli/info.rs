use anyhow::{Context, Result};
use std::path::PathBuf;

use meshparse::mesh::DescriptorStreamer;
use meshparse::summary::DescriptorSummary;

#[cfg(feature = "colorized_output")]
fn heading(text: &str) -> String {
    console::style(text).bold().cyan().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn heading(text: &str) -> String {
    text.to_string()
}

/// Display summary statistics of a descriptor file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let streamer = DescriptorStreamer::open(&file).context("Failed to open file")?;
    let summary = DescriptorSummary::from_records(streamer.records())
        .with_context(|| format!("Failed to read descriptors from {}", file.display()))?;

    println!("{}", heading("MeSH Descriptor File Information"));
    println!("================================");
    println!("File: {}", file.display());
    println!();
    print!("{}", summary);

    if !summary.categories.is_empty() {
        println!();
        println!("{}", heading("Tree numbers by category:"));
        for (category, count) in &summary.categories {
            println!("  {}: {}", category, count);
        }
    }

    Ok(())
}
