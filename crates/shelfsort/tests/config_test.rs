mod common;

use common::*;
use shelfsort_lib::*;
use std::fs;

#[test]
fn test_demo_config_written_as_toml_reloads() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("groups.toml");

    write_demo_config(&path).unwrap();
    let reloaded = GroupConfig::from_file(&path).unwrap();

    assert_eq!(reloaded, GroupConfig::demo().unwrap());
    let forest = GroupForest::from_config(&reloaded).unwrap();
    assert_eq!(forest.len(), demo_forest().len());
}

#[test]
fn test_demo_config_yaml_keeps_comments() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested/config_demo.yaml");

    write_demo_config(&path).unwrap();
    let content = fs::read_to_string(&path).unwrap();

    assert!(content.starts_with('#'));
    assert_eq!(
        GroupConfig::from_file(&path).unwrap(),
        GroupConfig::demo().unwrap()
    );
}

#[test]
fn test_scalar_and_capitalized_keys() {
    let forest = forest_from_yaml(
        r#"
Groups:
  Group: Years
  Include: 1984
  Groups:
    - name: 2001
      include: [odyssey, "2001"]
"#,
    );

    assert!(forest.find("Years").is_some());
    assert!(forest.find("Years/2001").is_some());

    let decision = explain(&Classifier::new(&forest), "Orwell_1984.epub");
    assert_eq!(decision.primary.as_deref(), Some("Years"));
}

#[test]
fn test_unnamed_group_rejected_with_position() {
    let config = GroupConfig::from_yaml(
        r#"
groups:
  - name: IT
    groups:
      - include: [Python]
"#,
    )
    .unwrap();

    match GroupForest::from_config(&config) {
        Err(SortError::Configuration { position, .. }) => {
            assert_eq!(position, "groups[0].groups[0]")
        }
        other => panic!("expected configuration error, got {:?}", other.map(|f| f.len())),
    }
}

#[test]
fn test_invalid_regex_reported_but_not_fatal() {
    let forest = forest_from_yaml(
        r#"
groups:
  - name: Broken
    include: ["regex:([unclosed", Manual]
"#,
    );

    let warnings = forest.pattern_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, "Broken");

    let decision = explain(&Classifier::new(&forest), "Owner_Manual.pdf");
    assert_eq!(decision.primary.as_deref(), Some("Broken"));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("absent.yaml");

    assert!(matches!(
        Config::new(Some(missing)),
        Err(SortError::FileNotFound(_))
    ));
}
