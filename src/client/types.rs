//! Response types. Bodies are kept verbatim as JSON objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded JSON object returned by the service, unmodified.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryResult(pub Map<String, Value>);

impl QueryResult {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `response` text, when the service returned one.
    pub fn response(&self) -> Option<&str> {
        self.get("response").and_then(Value::as_str)
    }

    /// Server-side processing time in seconds.
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.get("elapsed_seconds").and_then(Value::as_f64)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for QueryResult {
    fn from(map: Map<String, Value>) -> Self {
        QueryResult(map)
    }
}

/// One entry of the knowledgebase listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgebaseInfo(pub Map<String, Value>);

impl KnowledgebaseInfo {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Body of the `/list` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct KnowledgebaseList {
    #[serde(default)]
    pub knowledgebases: Option<Vec<KnowledgebaseInfo>>,
}

/// A failed batch item: the question and a description of the failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchError {
    pub query: String,
    pub error: String,
}

/// Per-question result of a batch query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Ok(QueryResult),
    Error(BatchError),
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchOutcome::Ok(_))
    }

    pub fn result(&self) -> Option<&QueryResult> {
        match self {
            BatchOutcome::Ok(result) => Some(result),
            BatchOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&BatchError> {
        match self {
            BatchOutcome::Ok(_) => None,
            BatchOutcome::Error(err) => Some(err),
        }
    }
}
