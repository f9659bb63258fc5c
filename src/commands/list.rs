use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use crate::client::KnowledgeBase;

use super::output::{knowledgebase_line, print_json};

/// List the knowledgebases available to the configured API key.
#[tracing::instrument(skip(client, out))]
pub async fn list<K: KnowledgeBase, W: Write>(client: &K, json: bool, out: &mut W) -> Result<()> {
    debug!("Listing knowledgebases from {}", client.base_url());

    let knowledgebases = client
        .list_knowledgebases()
        .await
        .context("Failed to list knowledgebases")?;

    if json {
        return print_json(out, &knowledgebases);
    }

    if knowledgebases.is_empty() {
        writeln!(out, "No knowledgebases available.")?;
        return Ok(());
    }

    for kb in &knowledgebases {
        writeln!(out, "{}", knowledgebase_line(kb))?;
    }

    Ok(())
}
