use std::collections::HashMap;
use std::sync::Arc;

use crate::model::Mapping;

/// A mapping from HTTP method to the ordered list of mappings registered
/// for that method. Insertion order is preserved; it is the tie-break for
/// equal scores, never otherwise semantically meaningful.
#[derive(Debug, Default, Clone)]
pub struct Catalogue {
    by_method: HashMap<String, Vec<Arc<Mapping>>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mapping: Mapping) {
        self.by_method
            .entry(mapping.request.method.clone())
            .or_default()
            .push(Arc::new(mapping));
    }

    pub fn for_method(&self, method: &str) -> &[Arc<Mapping>] {
        self.by_method
            .get(method)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_method.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommonMatch, RequestMapping, ResponseMapping};
    use std::collections::BTreeMap;

    fn mapping(method: &str, path: &str) -> Mapping {
        Mapping {
            scenario: None,
            request: RequestMapping {
                method: method.into(),
                path: CommonMatch {
                    exact: Some(path.into()),
                    ..Default::default()
                },
                headers: BTreeMap::new(),
                body: None,
            },
            response: ResponseMapping {
                status_code: 200,
                headers: BTreeMap::new(),
                body: String::new(),
                body_file: None,
                delay: None,
            },
            max_score: 1,
            cost: 0,
            source_file: String::new(),
        }
    }

    #[test]
    fn preserves_insertion_order_within_a_method() {
        let mut catalogue = Catalogue::new();
        catalogue.insert(mapping("GET", "/a"));
        catalogue.insert(mapping("GET", "/b"));
        let entries = catalogue.for_method("GET");
        assert_eq!(entries[0].request.path.exact.as_deref(), Some("/a"));
        assert_eq!(entries[1].request.path.exact.as_deref(), Some("/b"));
    }

    #[test]
    fn unknown_method_yields_an_empty_slice() {
        let catalogue = Catalogue::new();
        assert!(catalogue.for_method("DELETE").is_empty());
    }
}
