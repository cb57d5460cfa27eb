use anyhow::Result;
use mailscrub_config::Config;
use mailscrub_storage::Storage;

use super::{redact, report};

pub async fn handle(storage: &Storage, config: &Config) -> Result<()> {
    redact::handle(storage, config).await?;
    report::handle(storage, config, None, None).await
}
