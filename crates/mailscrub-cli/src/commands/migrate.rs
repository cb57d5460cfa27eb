use anyhow::Result;
use mailscrub_storage::Storage;
use std::path::Path;

pub async fn handle(storage: &Storage, db_path: &Path) -> Result<()> {
    storage.migrate().await?;

    println!("✓ Database ready: {}", db_path.display());
    println!("  Emails: {}", storage.count_emails().await?);
    println!("  Redacted: {}", storage.count_redacted().await?);

    Ok(())
}
