use anyhow::Result;
use log::debug;
use std::io::Write;

use crate::client::{KnowledgeBase, QueryOptions};

use super::output::{print_json, print_query_result};
use super::with_kb_context;

/// Ask one question and print the answer.
#[tracing::instrument(skip(client, options, out))]
pub async fn query<K: KnowledgeBase, W: Write>(
    client: &K,
    kb: &str,
    question: &str,
    options: &QueryOptions,
    json: bool,
    out: &mut W,
) -> Result<()> {
    debug!("Querying {} with options {:?}", kb, options);

    let result = client
        .query(kb, question, options)
        .await
        .map_err(|e| with_kb_context(e, kb, "Query failed"))?;

    if json {
        print_json(out, &result)
    } else {
        print_query_result(out, &result)
    }
}
