//! Load-boundary validation: every entry must carry exactly the catalog
//! schema's key set, and a rejected load never disturbs the active catalog.

use pretty_assertions::assert_eq;

use catvis_domain::{Catalog, DiagramError, MorphismKey, ViewerSession};

const VALID: &str = r#"{
    "A": {"name": "f", "input": "x", "output": "y", "compose": ["B", "C"], "level": 0},
    "B": {"name": "g", "input": "x", "output": "m", "compose": [], "level": 1},
    "C": {"name": "h", "input": "m", "output": "y", "compose": [], "level": 1}
}"#;

#[test]
fn valid_catalog_loads_with_order_preserved() {
    let catalog = Catalog::load(VALID).unwrap();
    assert_eq!(catalog.len(), 3);
    let keys: Vec<&MorphismKey> = catalog.iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec![
            &MorphismKey::new("A"),
            &MorphismKey::new("B"),
            &MorphismKey::new("C")
        ]
    );
}

#[test]
fn entry_with_extra_key_rejects_the_load() {
    let raw = r#"{"a": {"name": "x", "input": "i", "output": "o", "compose": [], "level": 0, "extra": 1}}"#;
    let err = Catalog::load(raw).unwrap_err();
    match err {
        DiagramError::Schema { key, reason } => {
            assert_eq!(key, "a");
            assert!(reason.contains("extra"), "reason should name the field: {reason}");
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn entry_with_missing_key_rejects_the_load() {
    let raw = r#"{"a": {"name": "x", "input": "i", "output": "o", "compose": []}}"#;
    assert!(matches!(
        Catalog::load(raw),
        Err(DiagramError::Schema { .. })
    ));
}

#[test]
fn non_json_input_is_a_catalog_error() {
    assert!(matches!(
        Catalog::load("not json at all"),
        Err(DiagramError::Catalog(_))
    ));
}

#[test]
fn top_level_array_is_a_catalog_error() {
    assert!(matches!(
        Catalog::load("[1, 2, 3]"),
        Err(DiagramError::Catalog(_))
    ));
}

#[test]
fn rejected_load_leaves_prior_catalog_untouched() {
    let mut session = ViewerSession::new();
    session.load_catalog(VALID, "default.json").unwrap();
    session.increment().unwrap();

    let bad = r#"{"a": {"name": "x", "input": "i", "output": "o", "compose": [], "level": 0, "extra": 1}}"#;
    assert!(session.load_catalog(bad, "bad.json").is_err());

    let state = session.navigation_state().unwrap();
    assert_eq!(state.current_level, 1);
    assert_eq!(state.root_key, MorphismKey::new("A"));
    assert_eq!(session.source_name(), Some("default.json"));
    assert_eq!(
        session.composition(),
        &[MorphismKey::new("B"), MorphismKey::new("C")]
    );
}

#[test]
fn empty_catalog_loads_but_cannot_navigate() {
    let catalog = Catalog::load("{}").unwrap();
    assert!(catalog.is_empty());
    assert!(matches!(catalog.max_level(), Err(DiagramError::Catalog(_))));

    let mut session = ViewerSession::new();
    assert!(session.load_catalog("{}", "empty.json").is_err());
    assert!(session.navigation_state().is_none());
}
