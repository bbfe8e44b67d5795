use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalogue::Catalogue;
use crate::jsonpath_cache::JsonPathCache;
use crate::model::{CommonMatch, Mapping, Request};
use crate::regex_cache::RegexCache;

/// Outcome of matching a request against a catalogue.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Exact(Arc<Mapping>),
    Partial(Arc<Mapping>),
    None,
}

/// Read-only access to scenario current-state, implemented by the scenario
/// handler. Passed to the matcher only when matching the scenario-only
/// catalogue; the main catalogue is matched with no lookup at all.
pub trait ScenarioStateLookup {
    fn current_state(&self, scenario_name: &str) -> Option<String>;
}

/// Scores and matches requests against a method-indexed catalogue. Holds no
/// mutable state of its own; the catalogue, regex cache and json-path cache
/// it reads are all immutable after load.
pub struct Matcher {
    regex_cache: Arc<RegexCache>,
    json_path_cache: Arc<JsonPathCache>,
}

impl Matcher {
    pub fn new(regex_cache: Arc<RegexCache>, json_path_cache: Arc<JsonPathCache>) -> Self {
        Self {
            regex_cache,
            json_path_cache,
        }
    }

    pub fn match_request(
        &self,
        request: &Request,
        catalogue: &Catalogue,
        scenario_states: Option<&dyn ScenarioStateLookup>,
    ) -> MatchOutcome {
        let candidates = catalogue.for_method(&request.method);

        let mut best_partial: Option<(u32, Arc<Mapping>)> = None;

        for mapping in candidates {
            if let Some(scenario) = &mapping.scenario {
                if let Some(lookup) = scenario_states {
                    let current = lookup.current_state(&scenario.name);
                    if current.as_deref() != Some(scenario.state.as_str()) {
                        continue;
                    }
                }
            }

            let score = self.score(mapping, request);

            if score == mapping.max_score {
                return MatchOutcome::Exact(mapping.clone());
            }

            if score > 0 && score > best_partial.as_ref().map(|(s, _)| *s).unwrap_or(0) {
                best_partial = Some((score, mapping.clone()));
            }
        }

        match best_partial {
            Some((_, mapping)) => MatchOutcome::Partial(mapping),
            None => MatchOutcome::None,
        }
    }

    fn score(&self, mapping: &Mapping, request: &Request) -> u32 {
        let path_score = mapping
            .request
            .path
            .evaluate(&request.path, &self.regex_cache)
            .unwrap_or(0);

        let header_score = self
            .evaluate_headers(&mapping.request.headers, &request.headers)
            .unwrap_or(0);

        let body_score = match &mapping.request.body {
            Some(body_match) => body_match
                .evaluate(&request.body, &self.regex_cache, &self.json_path_cache)
                .unwrap_or(0),
            None => 0,
        };

        path_score + header_score + body_score
    }

    fn evaluate_headers(
        &self,
        mapping_headers: &BTreeMap<String, CommonMatch>,
        request_headers: &BTreeMap<String, String>,
    ) -> Option<u32> {
        let mut total = 0;
        for (name, predicate) in mapping_headers {
            let value = request_headers.get(name)?;
            total += predicate.evaluate(value, &self.regex_cache)?;
        }
        Some(total)
    }
}
