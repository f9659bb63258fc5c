//! Text and JSON rendering shared by the commands.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::client::{BatchOutcome, KnowledgebaseInfo, QueryResult};

pub(crate) fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn knowledgebase_line(kb: &KnowledgebaseInfo) -> String {
    format!(
        "{}: {}",
        kb.name().unwrap_or("(unnamed)"),
        kb.description().unwrap_or("No description")
    )
}

/// Prints the `response` text and timing, or the whole object when there is
/// no `response` field.
pub(crate) fn print_query_result<W: Write>(out: &mut W, result: &QueryResult) -> Result<()> {
    match result.response() {
        Some(text) => {
            writeln!(out, "{}", text)?;
            if let Some(elapsed) = result.elapsed_seconds() {
                writeln!(out, "Processing time: {}s", elapsed)?;
            }
            Ok(())
        }
        None => print_json(out, result),
    }
}

pub(crate) fn batch_line(index: usize, outcome: &BatchOutcome) -> Result<String> {
    let line = match outcome {
        BatchOutcome::Ok(result) => match result.response() {
            Some(text) => format!("Q{}: {}", index + 1, text),
            None => format!("Q{}: {}", index + 1, serde_json::to_string(result)?),
        },
        BatchOutcome::Error(err) => format!("Q{}: Error - {}", index + 1, err.error),
    };
    Ok(line)
}
