use anyhow::Result;
use mailscrub_config::Config;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use super::pipeline;

pub async fn handle(path: Option<PathBuf>, config: &Config) -> Result<()> {
    let body = match path {
        Some(path) => tokio::fs::read_to_string(&path).await?,
        None => {
            let mut body = String::new();
            tokio::io::stdin().read_to_string(&mut body).await?;
            body
        }
    };

    print!("{}", pipeline(config).redact_body(&body));

    Ok(())
}
