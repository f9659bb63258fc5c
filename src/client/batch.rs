//! Sequential batch queries with per-question failure isolation.

use log::{debug, warn};
use std::time::Duration;

use super::{BatchError, BatchOutcome, KnowledgeBase, QueryOptions};

/// Fixed pause between successive batch calls, in milliseconds.
pub const BATCH_DELAY_MS: u64 = 100;

/// Runs `questions` one after another against `kb`.
///
/// Always returns one outcome per question, in input order. Failures are
/// recorded as [`BatchOutcome::Error`] and do not stop the batch. `delay` is
/// observed between successive calls, never before the first one.
pub async fn run_batch<K, S>(
    client: &K,
    kb: &str,
    questions: &[S],
    options: &QueryOptions,
    delay: Duration,
) -> Vec<BatchOutcome>
where
    K: KnowledgeBase + ?Sized,
    S: AsRef<str>,
{
    let mut outcomes = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        let question = question.as_ref();

        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        debug!("Batch {}/{}: {}", index + 1, questions.len(), question);

        match client.query(kb, question, options).await {
            Ok(result) => outcomes.push(BatchOutcome::Ok(result)),
            Err(e) => {
                warn!("Batch query {} failed: {}", index + 1, e);
                outcomes.push(BatchOutcome::Error(BatchError {
                    query: question.to_string(),
                    error: e.to_string(),
                }));
            }
        }
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockKnowledgeBase, QueryResult};
    use crate::http::ApiError;
    use mockall::predicate::eq;
    use serde_json::json;
    use std::time::Instant;

    fn answer(text: &str) -> QueryResult {
        QueryResult::from(json!({ "response": text }).as_object().unwrap().clone())
    }

    #[tokio::test]
    async fn test_batch_all_succeed_in_order() {
        let mut client = MockKnowledgeBase::new();
        client
            .expect_query()
            .times(3)
            .returning(|_, q, _| Ok(answer(&format!("answer to {}", q))));

        let questions = ["one", "two", "three"];
        let outcomes = run_batch(
            &client,
            "kb",
            &questions,
            &QueryOptions::new(),
            Duration::ZERO,
        )
        .await;

        assert_eq!(outcomes.len(), 3);
        for (outcome, question) in outcomes.iter().zip(questions) {
            assert_eq!(
                outcome.result().unwrap().response(),
                Some(format!("answer to {}", question).as_str())
            );
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_batch_failures_are_isolated() {
        let mut client = MockKnowledgeBase::new();
        client.expect_query().times(4).returning(|_, q, _| {
            if q.starts_with("bad") {
                Err(ApiError::Http {
                    status: 500,
                    body: "boom".into(),
                })
            } else {
                Ok(answer(q))
            }
        });

        let questions = vec![
            "good 1".to_string(),
            "bad 1".to_string(),
            "bad 2".to_string(),
            "good 2".to_string(),
        ];
        let outcomes = run_batch(
            &client,
            "kb",
            &questions,
            &QueryOptions::new(),
            Duration::ZERO,
        )
        .await;

        assert_eq!(outcomes.len(), 4);
        assert!(outcomes[0].is_ok());
        assert_eq!(outcomes[1].error().unwrap().query, "bad 1");
        assert!(outcomes[1].error().unwrap().error.contains("500"));
        assert_eq!(outcomes[2].error().unwrap().query, "bad 2");
        assert_eq!(outcomes[3].result().unwrap().response(), Some("good 2"));
    }

    #[tokio::test]
    async fn test_batch_passes_kb_and_shared_options() {
        let options = QueryOptions::new().temperature(0.5);
        let expected = options.clone();

        let mut client = MockKnowledgeBase::new();
        client
            .expect_query()
            .withf(move |kb, _, opts| kb == "okusiassociates" && *opts == expected)
            .times(2)
            .returning(|_, q, _| Ok(answer(q)));

        let outcomes = run_batch(&client, "okusiassociates", &["a", "b"], &options, Duration::ZERO)
            .await;
        assert!(outcomes.iter().all(BatchOutcome::is_ok));
    }

    #[tokio::test]
    async fn test_batch_empty_input() {
        let client = MockKnowledgeBase::new();
        let questions: [&str; 0] = [];
        let outcomes = run_batch(
            &client,
            "kb",
            &questions,
            &QueryOptions::new(),
            Duration::from_millis(BATCH_DELAY_MS),
        )
        .await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_batch_delay_between_calls_only() {
        let mut client = MockKnowledgeBase::new();
        client
            .expect_query()
            .with(eq("kb"), eq("single"), eq(QueryOptions::new()))
            .times(1)
            .returning(|_, q, _| Ok(answer(q)));

        // A single question never waits.
        let start = Instant::now();
        run_batch(
            &client,
            "kb",
            &["single"],
            &QueryOptions::new(),
            Duration::from_secs(5),
        )
        .await;
        assert!(start.elapsed() < Duration::from_secs(5));

        let mut client = MockKnowledgeBase::new();
        client
            .expect_query()
            .times(3)
            .returning(|_, _, _| Err(ApiError::InvalidInput("nope".into())));

        // Failures are still spaced out: two gaps for three questions.
        let start = Instant::now();
        let outcomes = run_batch(
            &client,
            "kb",
            &["a", "b", "c"],
            &QueryOptions::new(),
            Duration::from_millis(30),
        )
        .await;
        assert_eq!(outcomes.len(), 3);
        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
