//! Shared benchmarking helpers for Facade.
//!
//! Provides lightweight fixture builders so Criterion benches can exercise
//! the matcher and loader hot paths without depending on a running pingora
//! server.

pub mod support {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use facade_core::{Catalogue, JsonPathCache, Mapping, Matcher, RegexCache, Request};

    /// Builds a request with the given method and path and no headers/body.
    pub fn request(method: &str, path: &str) -> Request {
        Request {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            body: String::new(),
            request_id: "bench-request".into(),
            timestamp: "2026-01-01T00:00:00.000000000Z".into(),
        }
    }

    /// Builds `count` GET mappings with distinct exact paths plus one regex
    /// mapping, mirroring the shape of a moderately sized mock catalogue.
    pub fn catalogue_with_mappings(count: usize) -> Catalogue {
        let mut catalogue = Catalogue::new();

        for i in 0..count {
            let body = format!(
                r#"{{"request": {{"method": "GET", "path": {{"exact": "/fixtures/{i}"}}}}, "response": {{"statusCode": 200, "body": "fixture {i}"}}}}"#
            );
            let mut mapping: Mapping = serde_json::from_str(&body).expect("valid fixture mapping");
            mapping.finalize(&format!("fixture-{i}.json"));
            catalogue.insert(mapping);
        }

        let mut regex_mapping: Mapping = serde_json::from_str(
            r#"{"request": {"method": "GET", "path": {"pattern": ["fixtures/regex/[0-9]+$"]}}, "response": {"statusCode": 200, "body": "regex fixture"}}"#,
        )
        .expect("valid regex fixture mapping");
        regex_mapping.finalize("fixture-regex.json");
        catalogue.insert(regex_mapping);

        catalogue
    }

    /// Builds a matcher backed by a regex cache populated from the same
    /// catalogue produced by [`catalogue_with_mappings`].
    pub fn matcher_for(catalogue: &Catalogue) -> Matcher {
        let mut regex_cache = RegexCache::new();
        for mapping in catalogue.for_method("GET") {
            regex_cache
                .add_from_mapping(mapping, &mapping.source_file)
                .expect("fixture patterns compile");
        }

        Matcher::new(Arc::new(regex_cache), Arc::new(JsonPathCache::new()))
    }
}
