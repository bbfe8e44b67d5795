use std::collections::HashMap;
use std::sync::Arc;

use facade_errors::validation::{FieldError, ScenarioValidationError};
use parking_lot::Mutex;

use crate::catalogue::Catalogue;
use crate::matcher::{MatchOutcome, Matcher, ScenarioStateLookup};
use crate::model::{Mapping, Request};

struct ScenarioState {
    current_state: String,
    states: HashMap<String, Arc<Mapping>>,
    starting_state_count: u32,
}

/// Per-scenario finite-state machines layered on top of the matcher: they
/// restrict which mappings are eligible to the current state and advance
/// state on successful matches.
///
/// `states` is the only thing that mutates after load; a single coarse lock
/// covers the whole scenario-name → state map, matching the contention
/// profile of per-test-case scenarios.
pub struct ScenarioHandler {
    states: Mutex<HashMap<String, ScenarioState>>,
    catalogue: Catalogue,
}

impl Default for ScenarioHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioHandler {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            catalogue: Catalogue::new(),
        }
    }

    /// Registers a scenario-bearing mapping. A no-op if `mapping.scenario`
    /// is unset (the loader only calls this for mappings it has already
    /// routed here).
    pub fn add_scenario(&mut self, mapping: Mapping) {
        let Some(scenario) = mapping.scenario.clone() else {
            return;
        };

        {
            let mut states = self.states.lock();
            let entry = states.entry(scenario.name.clone()).or_insert_with(|| ScenarioState {
                current_state: scenario.state.clone(),
                states: HashMap::new(),
                starting_state_count: 0,
            });
            if scenario.starting_state {
                entry.current_state = scenario.state.clone();
                entry.starting_state_count += 1;
            }
            entry.states.insert(scenario.state.clone(), Arc::new(mapping.clone()));
        }

        self.catalogue.insert(mapping);
    }

    /// Checks, per scenario: exactly one starting state, at least two
    /// distinct states, and every `newState` resolves to a declared state.
    /// Accumulates every violation rather than stopping at the first.
    pub fn validate_scenario_states(&self) -> Result<(), ScenarioValidationError> {
        let states = self.states.lock();
        let mut errors = Vec::new();

        for (name, state) in states.iter() {
            if state.starting_state_count != 1 {
                errors.push(FieldError::new(
                    format!("scenario.{name}"),
                    format!(
                        "expected exactly one starting state, found {}",
                        state.starting_state_count
                    ),
                ));
            }

            if state.states.len() < 2 {
                errors.push(FieldError::new(
                    format!("scenario.{name}"),
                    "scenario must declare at least 2 distinct states",
                ));
            }

            for (state_name, mapping) in &state.states {
                let Some(scenario) = &mapping.scenario else { continue };
                if let Some(new_state) = &scenario.new_state {
                    if !state.states.contains_key(new_state) {
                        errors.push(FieldError::new(
                            format!("scenario.{name}.{state_name}.newState"),
                            format!("newState {new_state} is not a declared state of this scenario"),
                        ));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScenarioValidationError::new(errors))
        }
    }

    /// Matches `request` against the scenario-only catalogue with the live
    /// state table, using the shared matcher the caller also uses for the
    /// main catalogue. The matcher's own scenario gate already excludes
    /// mappings whose declared state differs from the current one, so any
    /// exact match returned here is guaranteed to be in the right state.
    pub fn match_scenario(&self, request: &Request, matcher: &Matcher) -> MatchOutcome {
        let outcome = matcher.match_request(request, &self.catalogue, Some(self));

        if let MatchOutcome::Exact(mapping) = &outcome {
            if let Some(scenario) = &mapping.scenario {
                if let Some(new_state) = &scenario.new_state {
                    let mut states = self.states.lock();
                    if let Some(state) = states.get_mut(&scenario.name) {
                        state.current_state = new_state.clone();
                    }
                }
            }
        }

        outcome
    }

    pub fn scenario_count(&self) -> usize {
        self.states.lock().len()
    }
}

impl ScenarioStateLookup for ScenarioHandler {
    fn current_state(&self, scenario_name: &str) -> Option<String> {
        self.states
            .lock()
            .get(scenario_name)
            .map(|state| state.current_state.clone())
    }
}
