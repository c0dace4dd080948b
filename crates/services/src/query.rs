//! The query-evaluation port and its JSONPath adapter.

use serde_json_path::JsonPath;

use pathfinder_core::model::Value;

use crate::error::QueryError;

/// Evaluates a query expression against a document.
///
/// Implementations return matched values in document order.
pub trait QueryEvaluator: Send + Sync {
    /// # Errors
    ///
    /// Returns `QueryError` for a blank or malformed expression.
    fn evaluate(&self, expression: &str, document: &Value) -> Result<Vec<Value>, QueryError>;
}

/// RFC 9535 JSONPath, backed by `serde_json_path`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathEvaluator;

impl JsonPathEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl QueryEvaluator for JsonPathEvaluator {
    fn evaluate(&self, expression: &str, document: &Value) -> Result<Vec<Value>, QueryError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(QueryError::Empty);
        }
        let path = JsonPath::parse(expression).map_err(|e| QueryError::Parse(e.to_string()))?;
        Ok(path.query(document).all().into_iter().cloned().collect())
    }
}
