use std::collections::HashMap;

use facade_errors::load::LoadError;
use regex::Regex;

use crate::model::Mapping;

/// Interns compiled regular expressions keyed by their pattern string.
/// Populated once at load time; read-only afterwards.
#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: HashMap<String, Regex>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and inserts every pattern referenced by a single mapping's
    /// path, body and header predicates. Re-adding an already-present
    /// pattern is a no-op, so repeated calls across mappings that share
    /// patterns never grow the cache.
    pub fn add_from_mapping(&mut self, mapping: &Mapping, source_file: &str) -> Result<(), LoadError> {
        for pattern in &mapping.request.path.patterns {
            self.compile_and_put(pattern, source_file, "request.path.pattern")?;
        }
        if let Some(body) = &mapping.request.body {
            for pattern in &body.common.patterns {
                self.compile_and_put(pattern, source_file, "request.body.pattern")?;
            }
        }
        for (name, header) in &mapping.request.headers {
            for pattern in &header.patterns {
                self.compile_and_put(pattern, source_file, &format!("request.headers.{name}.pattern"))?;
            }
        }
        Ok(())
    }

    /// Test/bench convenience: compiles a bare iterator of patterns without
    /// a mapping context.
    pub fn add_patterns<'a>(
        &mut self,
        patterns: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), LoadError> {
        for pattern in patterns {
            self.compile_and_put(pattern, "", "pattern")?;
        }
        Ok(())
    }

    fn compile_and_put(&mut self, pattern: &str, source_file: &str, field: &str) -> Result<(), LoadError> {
        if self.compiled.contains_key(pattern) {
            return Ok(());
        }
        let compiled = Regex::new(pattern).map_err(|err| LoadError::InvalidPattern {
            path: source_file.to_string(),
            field: field.to_string(),
            message: err.to_string(),
        })?;
        self.compiled.insert(pattern.to_string(), compiled);
        Ok(())
    }

    /// Returns whether `pattern` matches anywhere inside `value`. It is a
    /// contract violation to call this with a pattern that was never
    /// interned; an absent pattern is treated as a non-match rather than a
    /// panic, since a request can race a still-loading cache only in tests.
    pub fn is_match(&self, pattern: &str, value: &str) -> bool {
        match self.compiled.get(pattern) {
            Some(regex) => regex.is_match(value),
            None => {
                tracing::error!(pattern, "regex pattern was not interned before use");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
