use std::fs;
use std::path::Path;
use std::sync::Arc;

use facade_core::{Catalogue, JsonPathCache, Mapping, RegexCache, ScenarioHandler};
use facade_errors::load::LoadError;
use facade_errors::FacadeError;
use regex::Regex;
use walkdir::WalkDir;

/// Everything the loader produces: the immutable caches, the main
/// catalogue and the scenario handler (itself immutable save for its
/// per-scenario current-state field).
pub struct LoadResult {
    pub catalogue: Catalogue,
    pub scenario_handler: ScenarioHandler,
    pub regex_cache: Arc<RegexCache>,
    pub json_path_cache: Arc<JsonPathCache>,
}

/// Walks `mappings_path` recursively, decoding every regular file as a
/// mapping document, inlining response body files from `responses_path`,
/// validating and registering each mapping, then validating scenario
/// state machines once the whole tree has been consumed.
///
/// Load is transactional: the first error anywhere aborts the whole load
/// and no partial catalogue is returned.
pub fn load(mappings_path: &str, responses_path: &str) -> Result<LoadResult, FacadeError> {
    let mut regex_cache = RegexCache::new();
    let mut json_path_cache = JsonPathCache::new();
    let mut catalogue = Catalogue::new();
    let mut scenario_handler = ScenarioHandler::new();

    for entry in WalkDir::new(mappings_path).sort_by_file_name().follow_links(true) {
        let entry = entry.map_err(|err| LoadError::ReadFile {
            path: mappings_path.to_string(),
            message: err.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let source_file = path.display().to_string();

        tracing::debug!(source_file = %source_file, "loading mapping file");
        let mappings = decode_mapping_file(path)?;

        for mut mapping in mappings {
            inline_body_file(&mut mapping, responses_path, &source_file)?;
            mapping.finalize(&source_file);
            mapping.validate()?;

            regex_cache.add_from_mapping(&mapping, &source_file)?;
            if let Some(body) = &mapping.request.body {
                json_path_cache.intern_for(&body.json_path, &source_file, "request.body.jsonPath")?;
            }

            if mapping.scenario.is_some() {
                scenario_handler.add_scenario(mapping);
            } else {
                catalogue.insert(mapping);
            }
        }
    }

    scenario_handler.validate_scenario_states()?;

    tracing::info!(
        mappings = catalogue.len(),
        scenarios = scenario_handler.scenario_count(),
        "mapping catalogue loaded"
    );

    Ok(LoadResult {
        catalogue,
        scenario_handler,
        regex_cache: Arc::new(regex_cache),
        json_path_cache: Arc::new(json_path_cache),
    })
}

fn decode_mapping_file(path: &Path) -> Result<Vec<Mapping>, LoadError> {
    let content = fs::read_to_string(path).map_err(|err| LoadError::ReadFile {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;

    if let Ok(mappings) = serde_json::from_str::<Vec<Mapping>>(&content) {
        return Ok(mappings);
    }

    serde_json::from_str::<Mapping>(&content)
        .map(|mapping| vec![mapping])
        .map_err(|err| LoadError::Decode {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

fn inline_body_file(mapping: &mut Mapping, responses_path: &str, source_file: &str) -> Result<(), LoadError> {
    let Some(body_file) = mapping.response.body_file.clone().filter(|f| !f.trim().is_empty()) else {
        return Ok(());
    };

    let path = Path::new(responses_path).join(&body_file);
    let raw = fs::read_to_string(&path).map_err(|err| LoadError::ReadResponseBody {
        path: path.display().to_string(),
        mapping_path: source_file.to_string(),
        message: err.to_string(),
    })?;

    mapping.response.body = collapse_leading_whitespace(&raw);
    Ok(())
}

/// Collapses leading whitespace on each line using `\s*(.*)\n` → `$1`,
/// applied globally over the whole file contents. `\s` spans newlines, so
/// this also removes the line terminators themselves — pretty-printed
/// fixture files load as compact single-line bodies.
fn collapse_leading_whitespace(raw: &str) -> String {
    let pattern = Regex::new(r"\s*(.*)\n").expect("static pattern is valid");
    pattern.replace_all(raw, "$1").into_owned()
}
