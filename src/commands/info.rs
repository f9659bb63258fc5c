use anyhow::Result;
use std::io::Write;

use crate::client::KnowledgeBase;

use super::output::print_json;
use super::with_kb_context;

/// Print information about one knowledgebase.
#[tracing::instrument(skip(client, out))]
pub async fn info<K: KnowledgeBase, W: Write>(client: &K, kb: &str, out: &mut W) -> Result<()> {
    let info = client
        .kb_info(kb)
        .await
        .map_err(|e| with_kb_context(e, kb, "Failed to fetch knowledgebase info"))?;
    print_json(out, &info)
}
