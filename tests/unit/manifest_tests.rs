/*!
 * Tests for manifest loading from the filesystem
 */

use compose_validate::errors::ManifestError;
use compose_validate::manifest::Manifest;
use compose_validate::request::ValidationRequest;

use crate::common::{create_temp_dir, create_test_file, SAMPLE_COMPOSE};

#[test]
fn test_load_withValidFile_shouldParseServices() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "docker-compose.yml", SAMPLE_COMPOSE).unwrap();

    let manifest = Manifest::load(&path).unwrap();

    assert_eq!(manifest.top_level_keys(), vec!["version", "services"]);
    assert_eq!(manifest.service_names(), vec!["web", "db"]);
}

#[test]
fn test_load_withEmptyFile_shouldReturnParseError() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "docker-compose.yml", "").unwrap();

    assert!(matches!(Manifest::load(&path), Err(ManifestError::ParseError(_))));
}

#[test]
fn test_load_withDirectory_shouldReturnNotFound() {
    let dir = create_temp_dir().unwrap();

    assert!(matches!(Manifest::load(dir.path()), Err(ManifestError::NotFound { .. })));
}

#[test]
fn test_canonicalText_shouldKeepEveryTopLevelKey() {
    let source = "x-common: &common\n  restart: always\nname: shop\nservices:\n  web:\n    <<: *common\n    image: nginx\nnetworks:\n  default: {}\n";
    let manifest = Manifest::parse(source).unwrap();

    let request = ValidationRequest::new(&manifest).unwrap();
    let reparsed = Manifest::parse(request.compose()).unwrap();

    assert_eq!(reparsed.top_level_keys(), manifest.top_level_keys());
    assert_eq!(reparsed.top_level_keys(), vec!["x-common", "name", "services", "networks"]);
}
