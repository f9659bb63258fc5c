use anyhow::{Context, Result};
use std::io::Write;

use crate::client::KnowledgeBase;

use super::output::print_json;

/// Print the API help document.
#[tracing::instrument(skip(client, out))]
pub async fn api_help<K: KnowledgeBase, W: Write>(client: &K, out: &mut W) -> Result<()> {
    let help = client.help().await.context("Failed to fetch API help")?;
    print_json(out, &help)
}
