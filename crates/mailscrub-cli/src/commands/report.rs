use anyhow::Result;
use mailscrub_config::Config;
use mailscrub_core::ReportSource;
use mailscrub_engine::ReportWriter;
use mailscrub_storage::Storage;
use std::path::PathBuf;

pub async fn handle(
    storage: &Storage,
    config: &Config,
    out: Option<PathBuf>,
    source: Option<ReportSource>,
) -> Result<()> {
    let root = out.unwrap_or_else(|| config.report.generation_root.clone());
    let source = source.unwrap_or(config.report.source);

    let writer = ReportWriter::new(storage.clone(), root, source, config.report.columns.clone())
        .with_page_size(config.report.page_size);
    let summary = writer.write().await?;

    if summary.pages == 0 {
        println!("No {} to report.", source.table_name());
        return Ok(());
    }

    println!("✓ Wrote report: {}", writer.root().display());
    println!("  Pages: {}", summary.pages);
    println!("  Records: {}", summary.records);

    Ok(())
}
