use std::collections::BTreeMap;
use std::time::Duration;

use facade_errors::validation::{FieldError, ValidationError};
use serde::{Deserialize, Serialize};

/// A single inbound request, normalized by the request adapter at the HTTP
/// boundary. Header names are lower-cased on ingress; everything else is
/// read-only input to the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub timestamp: String,
}

/// A reusable predicate over a single string value. An empty CommonMatch
/// (no exact, no contains, no patterns) passes unconditionally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommonMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contains: Vec<String>,
    #[serde(default, rename = "pattern", skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
}

impl CommonMatch {
    pub fn is_empty(&self) -> bool {
        self.exact.is_none() && self.contains.is_empty() && self.patterns.is_empty()
    }

    /// Number of active predicate features, counted the same way whether the
    /// predicate ultimately passes or not.
    pub fn max_score(&self) -> u32 {
        if self.exact.is_some() {
            1
        } else {
            (self.contains.len() + self.patterns.len()) as u32
        }
    }

    pub fn cost(&self) -> u32 {
        self.contains.len() as u32 * 2 + self.patterns.len() as u32 * 5
    }

    fn patterns_match(&self, value: &str, regex_cache: &crate::regex_cache::RegexCache) -> bool {
        self.patterns
            .iter()
            .all(|pattern| regex_cache.is_match(pattern, value))
    }

    /// Evaluates this predicate against `value`. Returns `Some(score)` when
    /// every configured feature passed (the score contributed by this
    /// field), or `None` when at least one feature failed.
    pub fn evaluate(&self, value: &str, regex_cache: &crate::regex_cache::RegexCache) -> Option<u32> {
        if let Some(exact) = &self.exact {
            return (exact == value).then_some(1);
        }

        let contains_ok = self.contains.iter().all(|needle| value.contains(needle));
        if !contains_ok {
            return None;
        }

        if !self.patterns_match(value, regex_cache) {
            return None;
        }

        Some((self.contains.len() + self.patterns.len()) as u32)
    }
}

/// Extends CommonMatch with JSON-path predicates evaluated against a parsed
/// request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BodyMatch {
    #[serde(flatten)]
    pub common: CommonMatch,
    #[serde(default, rename = "jsonPath", skip_serializing_if = "Vec::is_empty")]
    pub json_path: Vec<String>,
}

impl BodyMatch {
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.json_path.is_empty()
    }

    pub fn max_score(&self) -> u32 {
        if self.common.exact.is_some() {
            1
        } else {
            self.common.max_score() + self.json_path.len() as u32
        }
    }

    pub fn cost(&self) -> u32 {
        self.common.cost() + self.json_path.len() as u32 * 4
    }

    pub fn evaluate(
        &self,
        value: &str,
        regex_cache: &crate::regex_cache::RegexCache,
        json_path_cache: &crate::jsonpath_cache::JsonPathCache,
    ) -> Option<u32> {
        if let Some(exact) = &self.common.exact {
            return (exact == value).then_some(1);
        }

        let contains_ok = self.common.contains.iter().all(|needle| value.contains(needle));
        if !contains_ok {
            return None;
        }

        if !self
            .common
            .patterns
            .iter()
            .all(|pattern| regex_cache.is_match(pattern, value))
        {
            return None;
        }

        if !json_path_cache.is_match(&self.json_path, value) {
            return None;
        }

        Some((self.common.contains.len() + self.common.patterns.len() + self.json_path.len()) as u32)
    }
}

/// The request-side predicate of a Mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestMapping {
    pub method: String,
    pub path: CommonMatch,
    #[serde(default)]
    pub headers: BTreeMap<String, CommonMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyMatch>,
}

impl RequestMapping {
    /// Lower-cases header predicate keys once, at load time, so the hot
    /// match path never has to case-fold.
    pub fn normalize(&mut self) {
        self.method = self.method.to_uppercase();
        if self.headers.keys().any(|k| k.chars().any(|c| c.is_uppercase())) {
            let lowered = std::mem::take(&mut self.headers)
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect();
            self.headers = lowered;
        }
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.method.trim().is_empty() {
            errors.push(FieldError::new("request.method", "method must not be empty"));
        }
        if self.path.is_empty() {
            errors.push(FieldError::new(
                "request.path",
                "path must set at least one of exact, contains or pattern",
            ));
        }
        errors
    }
}

/// The response-side template of a Mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseMapping {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default, rename = "bodyFile", skip_serializing_if = "Option::is_none")]
    pub body_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<Delay>,
}

/// A response delay. Only the fixed variant exists today; the enum shape
/// leaves room for distributions (uniform, lognormal, ...) without touching
/// the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Delay {
    #[serde(rename = "fixed")]
    Fixed(FixedDelay),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedDelay {
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

/// A scenario reference attached to a Mapping, gating its eligibility on the
/// scenario's current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioMapping {
    pub name: String,
    pub state: String,
    #[serde(default, rename = "startingState")]
    pub starting_state: bool,
    #[serde(default, rename = "newState", skip_serializing_if = "Option::is_none")]
    pub new_state: Option<String>,
}

impl ScenarioMapping {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("scenario.name", "scenario name must not be empty"));
        }
        if self.state.trim().is_empty() {
            errors.push(FieldError::new("scenario.state", "scenario state must not be empty"));
        }
        errors
    }
}

/// A single request→response rule, as decoded from a mapping file plus
/// fields derived at load time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioMapping>,
    pub request: RequestMapping,
    pub response: ResponseMapping,
    #[serde(default)]
    pub max_score: u32,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub source_file: String,
}

impl Mapping {
    /// Lower-cases header keys and recomputes `max_score`/`cost`. Called
    /// once by the loader right after decoding.
    pub fn finalize(&mut self, source_file: impl Into<String>) {
        self.request.normalize();
        self.source_file = source_file.into();
        self.max_score = self.compute_max_score();
        self.cost = self.compute_cost();
    }

    fn compute_max_score(&self) -> u32 {
        let path_score = self.request.path.max_score();
        let header_score: u32 = self.request.headers.values().map(CommonMatch::max_score).sum();
        let body_score = self.request.body.as_ref().map(BodyMatch::max_score).unwrap_or(0);
        path_score + header_score + body_score
    }

    fn compute_cost(&self) -> u32 {
        let path_cost = self.request.path.cost();
        let header_cost: u32 = self.request.headers.values().map(CommonMatch::cost).sum();
        let body_cost = self.request.body.as_ref().map(BodyMatch::cost).unwrap_or(0);
        path_cost + header_cost + body_cost
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = self.request.validate();
        if let Some(scenario) = &self.scenario {
            errors.extend(scenario.validate());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }
}
