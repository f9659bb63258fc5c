//! Query tuning options and their query-string encoding.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single extension parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => f.write_str(&format_float(*x)),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// Whole numbers keep their fractional part: `1.0` renders as `1.0`, not `1`.
fn format_float(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Int(i.into())
    }
}

impl From<u32> for ParamValue {
    fn from(i: u32) -> Self {
        ParamValue::Int(i.into())
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

/// Optional tuning parameters for a query.
///
/// Unset fields are left out of the request so the server applies its own
/// defaults. Entries in `extra` are merged last and replace any named
/// parameter with the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Return retrieved context only, without model synthesis.
    pub context_only: bool,
    /// Additional reference text for the model.
    pub reference: Option<String>,
    /// Model to answer with.
    pub model: Option<String>,
    /// Response creativity (0.0-1.0).
    pub temperature: Option<f64>,
    /// Number of context chunks to retrieve.
    pub top_k: Option<u32>,
    /// Forward-compatible parameters not covered above.
    pub extra: BTreeMap<String, ParamValue>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context_only(mut self, context_only: bool) -> Self {
        self.context_only = context_only;
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Encodes the question and options as query-string pairs.
    ///
    /// `q` comes first, then the named options that are set, then `extra`.
    /// An `extra` key that is already present overwrites the value in place.
    pub fn to_query_pairs(&self, question: &str) -> Vec<(String, String)> {
        let mut pairs = vec![("q".to_string(), question.to_string())];

        if self.context_only {
            pairs.push(("context_only".to_string(), "true".to_string()));
        }
        if let Some(reference) = self.reference.as_deref().filter(|r| !r.is_empty()) {
            pairs.push(("reference".to_string(), reference.to_string()));
        }
        if let Some(model) = self.model.as_deref().filter(|m| !m.is_empty()) {
            pairs.push(("model".to_string(), model.to_string()));
        }
        if let Some(temperature) = self.temperature {
            pairs.push(("temperature".to_string(), format_float(temperature)));
        }
        if let Some(top_k) = self.top_k {
            pairs.push(("top_k".to_string(), top_k.to_string()));
        }

        for (key, value) in &self.extra {
            let value = value.to_string();
            match pairs.iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value,
                None => pairs.push((key.clone(), value)),
            }
        }

        pairs
    }
}
