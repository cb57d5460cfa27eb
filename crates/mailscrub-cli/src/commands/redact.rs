use anyhow::Result;
use mailscrub_config::Config;
use mailscrub_engine::RedactionRun;
use mailscrub_storage::Storage;

use super::pipeline;

pub async fn handle(storage: &Storage, config: &Config) -> Result<()> {
    let summary = RedactionRun::new(storage.clone(), pipeline(config))
        .run()
        .await?;

    println!("✓ Redacted {} email(s)", summary.redacted);

    Ok(())
}
