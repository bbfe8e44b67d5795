use std::collections::HashMap;
use std::str::FromStr;

use facade_errors::load::LoadError;
use jsonpath_rust::{JsonPathFinder, JsonPathInst};
use serde_json::Value;

/// Interns parsed JSON-path expressions keyed by their source string.
/// Populated once at load time; read-only afterwards.
#[derive(Debug, Default)]
pub struct JsonPathCache {
    compiled: HashMap<String, JsonPathInst>,
}

impl JsonPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and inserts each not-yet-present expression. Fails fast: the
    /// first parse error aborts without inserting the rest of the batch.
    pub fn intern(&mut self, expressions: &[String]) -> Result<(), LoadError> {
        self.intern_for(expressions, "", "")
    }

    pub fn intern_for(
        &mut self,
        expressions: &[String],
        source_file: &str,
        field: &str,
    ) -> Result<(), LoadError> {
        for expr in expressions {
            if self.compiled.contains_key(expr) {
                continue;
            }
            let parsed = JsonPathInst::from_str(expr).map_err(|err| LoadError::InvalidJsonPath {
                path: source_file.to_string(),
                field: field.to_string(),
                message: err.to_string(),
            })?;
            self.compiled.insert(expr.clone(), parsed);
        }
        Ok(())
    }

    /// Parses `body_json` as JSON and checks that every expression in
    /// `expressions` yields at least one matching node. A body that fails
    /// to parse as JSON is logged and treated as a non-match rather than
    /// propagated as an error, since an unparseable body is never the
    /// matcher's fault.
    pub fn is_match(&self, expressions: &[String], body_json: &str) -> bool {
        if expressions.is_empty() {
            return true;
        }

        let value: Value = match serde_json::from_str(body_json) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(error = %err, "failed to parse request body as json for jsonpath matching");
                return false;
            }
        };

        expressions.iter().all(|expr| self.expression_matches(expr, &value))
    }

    fn expression_matches(&self, expr: &str, value: &Value) -> bool {
        let Some(inst) = self.compiled.get(expr) else {
            tracing::error!(expr, "jsonpath expression was not interned before use");
            return false;
        };

        let finder = JsonPathFinder::new(Box::new(value.clone()), Box::new(inst.clone()));
        match finder.find() {
            Value::Array(matches) => !matches.is_empty(),
            Value::Null => false,
            _ => true,
        }
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
