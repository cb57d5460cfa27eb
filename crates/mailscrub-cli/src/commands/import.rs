use anyhow::{Context, Result};
use mailscrub_core::Record;
use mailscrub_storage::Storage;
use std::path::Path;

pub async fn handle(storage: &Storage, path: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let records = parse_records(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), records = records.len(), "Parsed import file");
    let imported = storage.insert_emails(&records).await?;

    println!("✓ Imported {} email(s) from {}", imported, path.display());

    Ok(())
}

/// Parse JSON Lines, skipping blank lines
fn parse_records(content: &str) -> Result<Vec<Record>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            Record::from_json(line).with_context(|| format!("line {}", idx + 1))
        })
        .collect()
}
