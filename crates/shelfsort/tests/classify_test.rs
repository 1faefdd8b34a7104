mod common;

use common::*;
use shelfsort_lib::*;

fn primary_of(forest: &GroupForest, name: &str) -> Option<String> {
    explain(&Classifier::new(forest), name).primary
}

#[test]
fn test_demo_config_loads() {
    let forest = demo_forest();

    let roots: Vec<String> = forest
        .roots()
        .iter()
        .map(|id| forest.display_name(*id))
        .collect();
    assert_eq!(roots, vec!["IT", "Science", "Kids", "Arts", "Literature"]);
    assert!(forest.find("IT/Programming/C++").is_some());
    assert!(forest.find("Science/Biology/For_Kids").is_some());
    assert!(forest.pattern_warnings().is_empty());
}

#[test]
fn test_regex_rule_classifies_cpp_book() {
    let forest = demo_forest();
    let decision = explain(&Classifier::new(&forest), "Modern_C++_Design.pdf");

    assert_eq!(decision.normalized, "modern c++ design");
    assert_eq!(decision.matches, vec!["IT/Programming/C++"]);
    assert_eq!(decision.primary.as_deref(), Some("IT/Programming/C++"));
    assert!(decision.secondaries.is_empty());
}

#[test]
fn test_exclude_routes_to_sibling_group() {
    let forest = demo_forest();
    let decision = explain(&Classifier::new(&forest), "Office_on_Linux.pdf");

    assert_eq!(decision.matches, vec!["IT/Systems/Linux"]);
}

#[test]
fn test_child_claims_file_before_parent() {
    let forest = demo_forest();

    assert_eq!(
        primary_of(&forest, "Biology_for_kids.pdf").as_deref(),
        Some("Science/Biology/For_Kids")
    );
    assert_eq!(
        primary_of(&forest, "Biology_Textbook.djvu").as_deref(),
        Some("Science/Biology")
    );
}

#[test]
fn test_multiple_groups_ordered_by_priority() {
    let forest = demo_forest();
    let decision = explain(&Classifier::new(&forest), "Python_for_Kids_Stories.pdf");

    // Kids has the longest rule ("Fairy_tales").
    assert_eq!(decision.primary.as_deref(), Some("Kids"));
    assert_eq!(
        decision.secondaries,
        vec!["Science/Biology/For_Kids", "IT/Programming/Python"]
    );
}

#[test]
fn test_cyrillic_names_match() {
    let forest = demo_forest();

    assert_eq!(
        primary_of(&forest, "Физика_для_всех.pdf").as_deref(),
        Some("Science/Physics")
    );
}

#[test]
fn test_unmatched_name_has_no_placement() {
    let forest = demo_forest();
    let decision = explain(&Classifier::new(&forest), "holiday_receipts.txt");

    assert!(decision.matches.is_empty());
    assert!(decision.primary.is_none());
}

#[test]
fn test_wildcard_rule_priority_uses_longest_alternative() {
    let forest = forest_from_yaml(
        r#"
groups:
  - name: Web
    include: "PHP*MySQL|PHP"
  - name: Databases
    include: [MySQL]
"#,
    );
    let decision = explain(&Classifier::new(&forest), "PHP-and-MySQL tutorial.pdf");

    assert_eq!(decision.normalized, "php and mysql tutorial");
    assert_eq!(decision.primary.as_deref(), Some("Web"));
    assert_eq!(decision.secondaries, vec!["Databases"]);
}
