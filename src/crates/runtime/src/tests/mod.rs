use std::fs;

use facade_config::FacadeConfig;
use tempfile::tempdir;

use crate::Facade;

fn config_with(mappings_dir: &str, responses_dir: &str) -> FacadeConfig {
    let mut config = FacadeConfig::default();
    config.loader.path.mapping = mappings_dir.to_string();
    config.loader.path.response = responses_dir.to_string();
    config.server.port = 18080;
    config.health.port = 18081;
    config
}

#[test]
fn builder_loads_mappings_and_produces_a_facade() {
    let mappings_dir = tempdir().unwrap();
    let responses_dir = tempdir().unwrap();

    fs::write(
        mappings_dir.path().join("simple.json"),
        r#"{"request": {"method": "GET", "path": {"exact": "/simple"}}, "response": {"statusCode": 200, "body": "I'm a simple"}}"#,
    )
    .unwrap();

    let config = config_with(
        mappings_dir.path().to_str().unwrap(),
        responses_dir.path().to_str().unwrap(),
    );

    let facade = Facade::builder(config).build().unwrap();
    assert_eq!(facade.config().server.port, 18080);
}

#[test]
fn builder_surfaces_validation_errors_from_the_loader() {
    let mappings_dir = tempdir().unwrap();
    let responses_dir = tempdir().unwrap();

    fs::write(
        mappings_dir.path().join("bad.json"),
        r#"{"request": {"method": "", "path": {}}, "response": {"statusCode": 200}}"#,
    )
    .unwrap();

    let config = config_with(
        mappings_dir.path().to_str().unwrap(),
        responses_dir.path().to_str().unwrap(),
    );

    assert!(Facade::builder(config).build().is_err());
}
