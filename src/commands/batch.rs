use anyhow::{Result, bail};
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::{
    client::{KnowledgeBase, QueryOptions, run_batch},
    runtime::Runtime,
};

use super::output::{batch_line, print_json};

/// Collects batch questions from the command line and an optional file.
///
/// File lines are trimmed; blank lines and lines starting with `#` are skipped.
pub fn load_questions<R: Runtime>(
    runtime: &R,
    inline: Vec<String>,
    file: Option<&Path>,
) -> Result<Vec<String>> {
    let mut questions: Vec<String> = inline
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    if let Some(path) = file {
        if !runtime.exists(path) {
            bail!("Questions file not found: {}", path.display());
        }
        let content = runtime.read_to_string(path)?;
        let before = questions.len();
        questions.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
        debug!(
            "Loaded {} question(s) from {}",
            questions.len() - before,
            path.display()
        );
    }

    if questions.is_empty() {
        bail!("No questions given. Pass questions as arguments or use --file.");
    }

    Ok(questions)
}

/// Run several questions against one knowledgebase and print every outcome.
///
/// Individual failures are printed, not returned.
#[tracing::instrument(skip(client, questions, options, out))]
pub async fn batch<K: KnowledgeBase, W: Write>(
    client: &K,
    kb: &str,
    questions: &[String],
    options: &QueryOptions,
    delay: Duration,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let outcomes = run_batch(client, kb, questions, options, delay).await;

    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    info!("{}/{} batch queries succeeded", succeeded, outcomes.len());

    if json {
        return print_json(out, &outcomes);
    }

    for (index, outcome) in outcomes.iter().enumerate() {
        writeln!(out, "{}", batch_line(index, outcome)?)?;
    }

    Ok(())
}
