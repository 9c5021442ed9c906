//! Load all content and report what was skipped.

use crate::envelope::envelope;
use anyhow::{bail, Context, Result};
use pressroom_core::ArticleRepository;

pub async fn check_content(repo: &ArticleRepository, json: bool, strict: bool) -> Result<()> {
    let report = repo
        .load_report()
        .await
        .context("Failed to load articles")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&envelope("load.report", &report))?
        );
    } else {
        println!(
            "Discovered {} documents, loaded {} articles, skipped {}",
            report.discovered,
            report.loaded,
            report.skipped.len()
        );
        for skipped in &report.skipped {
            println!("  {}: [{}] {}", skipped.source, skipped.code, skipped.message);
        }
    }

    if strict && !report.is_clean() {
        bail!("{} documents were skipped", report.skipped.len());
    }

    Ok(())
}
