use std::collections::BTreeMap;
use std::sync::Arc;

use facade_core::{Catalogue, Delayer, MatchOutcome, Matcher, Request, RequestMapping, ScenarioHandler};
use facade_loader::LoadResult;
use serde::Serialize;

const NO_MAPPING_FOUND_MESSAGE: &str = "No mapping found for the request";

/// The shaped result of matching a single request: an HTTP status, headers
/// and a raw body ready to be written back by the HTTP boundary.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub matched: bool,
}

/// The JSON envelope returned on a 404, with an optional diagnostic
/// pointer at the closest mapping that was found.
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundResponse {
    pub message: String,
    pub request: Request,
    #[serde(rename = "closestMapping", skip_serializing_if = "Option::is_none")]
    pub closest_mapping: Option<RequestMapping>,
}

/// Composes the matcher, scenario handler and delayer to produce the final
/// response for an inbound request. Built once from a [`LoadResult`] and
/// shared read-only across every request thereafter.
pub struct Service {
    matcher: Matcher,
    scenario_handler: ScenarioHandler,
    catalogue: Catalogue,
    delayer: Arc<dyn Delayer>,
}

impl Service {
    pub fn new(load: LoadResult, delayer: Arc<dyn Delayer>) -> Self {
        let matcher = Matcher::new(load.regex_cache, load.json_path_cache);
        Self {
            matcher,
            scenario_handler: load.scenario_handler,
            catalogue: load.catalogue,
            delayer,
        }
    }

    pub async fn match_request(&self, request: Request) -> MatchResult {
        let scenario_outcome = self.scenario_handler.match_scenario(&request, &self.matcher);

        let outcome = match scenario_outcome {
            MatchOutcome::None => self.matcher.match_request(&request, &self.catalogue, None),
            other => other,
        };

        let result = build_match_result(&outcome, &request);

        if let MatchOutcome::Exact(mapping) = &outcome {
            self.delayer.apply(mapping.response.delay.as_ref()).await;
        }

        result
    }
}

fn build_match_result(outcome: &MatchOutcome, request: &Request) -> MatchResult {
    match outcome {
        MatchOutcome::Exact(mapping) => {
            let mut headers = mapping.response.headers.clone();
            headers.insert("X-Mapping-File".to_string(), mapping.source_file.clone());
            MatchResult {
                status_code: mapping.response.status_code,
                headers,
                body: mapping.response.body.clone().into_bytes(),
                matched: true,
            }
        }
        MatchOutcome::Partial(mapping) => {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                request_id = %request.request_id,
                closest_mapping_file = %mapping.source_file,
                "no exact match, responding with closest mapping"
            );
            let not_found = NotFoundResponse {
                message: NO_MAPPING_FOUND_MESSAGE.to_string(),
                request: request.clone(),
                closest_mapping: Some(mapping.request.clone()),
            };
            let mut headers = BTreeMap::new();
            headers.insert("Content-type".to_string(), "application/json".to_string());
            headers.insert("X-Mapping-File".to_string(), mapping.source_file.clone());
            MatchResult {
                status_code: 404,
                headers,
                body: serde_json::to_vec(&not_found).unwrap_or_default(),
                matched: false,
            }
        }
        MatchOutcome::None => {
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                request_id = %request.request_id,
                "no mapping found for the request"
            );
            let not_found = NotFoundResponse {
                message: NO_MAPPING_FOUND_MESSAGE.to_string(),
                request: request.clone(),
                closest_mapping: None,
            };
            let mut headers = BTreeMap::new();
            headers.insert("Content-type".to_string(), "application/json".to_string());
            MatchResult {
                status_code: 404,
                headers,
                body: serde_json::to_vec(&not_found).unwrap_or_default(),
                matched: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facade_core::ResponseDelayer;
    use std::fs;
    use tempfile::tempdir;

    fn request(method: &str, path: &str) -> Request {
        Request {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            body: String::new(),
            request_id: "test-id".into(),
            timestamp: "2026-01-01T00:00:00.000000000Z".into(),
        }
    }

    fn load_fixture(json: &str) -> LoadResult {
        let mappings_dir = tempdir().unwrap();
        let responses_dir = tempdir().unwrap();
        fs::write(mappings_dir.path().join("mapping.json"), json).unwrap();
        facade_loader::load(
            mappings_dir.path().to_str().unwrap(),
            responses_dir.path().to_str().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn exact_match_returns_mapped_response_with_diagnostic_header() {
        let load = load_fixture(
            r#"{"request": {"method": "GET", "path": {"exact": "/simple"}}, "response": {"statusCode": 200, "body": "I'm a simple"}}"#,
        );
        let service = Service::new(load, Arc::new(ResponseDelayer::new()));

        let result = service.match_request(request("GET", "/simple")).await;
        assert_eq!(result.status_code, 200);
        assert!(result.matched);
        assert_eq!(result.body, b"I'm a simple");
        assert!(result.headers.contains_key("X-Mapping-File"));
    }

    #[tokio::test]
    async fn no_match_returns_404_without_closest_mapping() {
        let load = load_fixture(
            r#"{"request": {"method": "GET", "path": {"exact": "/simple"}}, "response": {"statusCode": 200, "body": "ok"}}"#,
        );
        let service = Service::new(load, Arc::new(ResponseDelayer::new()));

        let result = service.match_request(request("POST", "/other")).await;
        assert_eq!(result.status_code, 404);
        assert!(!result.matched);
        let body: serde_json::Value = serde_json::from_slice(&result.body).unwrap();
        assert!(body.get("closestMapping").is_none());
    }

    #[tokio::test]
    async fn partial_match_surfaces_the_closest_mapping() {
        let load = load_fixture(
            r#"{"request": {"method": "GET", "path": {"contains": ["/bears/"]}, "headers": {"authorization": {"exact": "Bearer Bear"}}}, "response": {"statusCode": 200, "body": "ok"}}"#,
        );
        let service = Service::new(load, Arc::new(ResponseDelayer::new()));

        let result = service.match_request(request("GET", "/bears/321")).await;
        assert_eq!(result.status_code, 404);
        let body: serde_json::Value = serde_json::from_slice(&result.body).unwrap();
        assert!(body.get("closestMapping").is_some());
    }
}
