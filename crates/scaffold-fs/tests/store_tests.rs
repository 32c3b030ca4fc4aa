use pretty_assertions::assert_eq;
use rstest::rstest;
use scaffold_fs::{DocumentStore, Error, Format, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    version: u32,
    files: Vec<String>,
}

fn sample() -> Record {
    Record {
        version: 1,
        files: vec!["AGENTS.md".into(), "opencode.json".into()],
    }
}

#[rstest]
#[case("record.json")]
#[case("record.yaml")]
#[case("record.yml")]
fn save_then_load(#[case] name: &str) {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join(name);
    let store = DocumentStore::new();

    store.save(&path, &sample()).unwrap();
    let loaded: Record = store.load(&path).unwrap();

    assert_eq!(loaded, sample());
}

#[test]
fn json_output_ends_with_newline() {
    let store = DocumentStore::new();
    let rendered = store
        .render(&NormalizedPath::new("x.json"), &sample())
        .unwrap();
    assert!(rendered.ends_with("}\n"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let result = Format::from_path(&NormalizedPath::new(".agents/manifest.toml"));
    assert!(matches!(result, Err(Error::UnsupportedFormat { extension }) if extension == "toml"));
}

#[test]
fn parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let native = temp.path().join("broken.yaml");
    fs::write(&native, "version: [unclosed").unwrap();

    let err = DocumentStore::new()
        .load::<Record>(&NormalizedPath::new(&native))
        .unwrap_err();

    assert!(err.to_string().contains("YAML"), "got: {err}");
}
