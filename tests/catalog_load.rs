//! Loading catalogs from disk.

use std::io::Write;

use furnish::{CatalogError, FurnitureCatalog};
use rstest::rstest;
use tempfile::NamedTempFile;

const BUNDLED: &str = include_str!("../assets/catalog.json");

fn write_catalog(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write catalog");
    file
}

#[test]
fn bundled_catalog_loads_from_disk() {
    let file = write_catalog(BUNDLED);
    let catalog = FurnitureCatalog::load(file.path()).expect("bundled catalog is valid");
    assert_eq!(catalog.len(), 4);
    let lamp = catalog
        .index_of("Floor Lamp")
        .and_then(|index| catalog.get(index))
        .expect("lamp listed");
    assert!(lamp.collider.is_none());
    assert_eq!(lamp.thumbnail.as_deref(), Some("thumbs/floor_lamp.png"));
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = FurnitureCatalog::load(&path).expect_err("file is missing");
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[rstest]
#[case::not_json("items: []")]
#[case::wrong_shape(r#"{"items": [{"collider": null}]}"#)]
fn malformed_documents_are_parse_errors(#[case] text: &str) {
    let file = write_catalog(text);
    let err = FurnitureCatalog::load(file.path()).expect_err("malformed");
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[rstest]
#[case::empty(r#"{"items": []}"#, "no items")]
#[case::duplicate(
    r#"{"items": [{"name": "Stool"}, {"name": "Stool"}]}"#,
    "Stool"
)]
fn invalid_catalogs_are_rejected(#[case] text: &str, #[case] message: &str) {
    let file = write_catalog(text);
    let err = FurnitureCatalog::load(file.path()).expect_err("invalid");
    assert!(err.to_string().contains(message), "unexpected error: {err}");
}
