//! Navigation bounds and click-to-descend behavior, driven through the
//! session facade the way the host UI drives it.

use test_case::test_case;

use catvis_domain::{MorphismKey, ViewerSession};

/// Three levels, fully decomposed
const DEEP: &str = r#"{
    "root": {"name": "r", "input": "x", "output": "y", "compose": ["a", "b"], "level": 0},
    "a": {"name": "a", "input": "x", "output": "m", "compose": ["a1"], "level": 1},
    "b": {"name": "b", "input": "m", "output": "y", "compose": ["b1"], "level": 1},
    "a1": {"name": "a1", "input": "x", "output": "m", "compose": ["a11"], "level": 2},
    "b1": {"name": "b1", "input": "m", "output": "y", "compose": ["b11"], "level": 2},
    "a11": {"name": "a11", "input": "x", "output": "m", "compose": [], "level": 3},
    "b11": {"name": "b11", "input": "m", "output": "y", "compose": [], "level": 3}
}"#;

fn session() -> ViewerSession {
    let mut session = ViewerSession::new();
    session.load_catalog(DEEP, "deep.json").unwrap();
    session
}

fn keys(raw: &[&str]) -> Vec<MorphismKey> {
    raw.iter().map(|k| MorphismKey::new(*k)).collect()
}

#[test_case(1, 1 ; "one step down")]
#[test_case(3, 3 ; "to the bottom")]
#[test_case(10, 3 ; "increments never exceed max level")]
fn repeated_increments_are_bounded(steps: usize, expected_level: u32) {
    let mut session = session();
    for _ in 0..steps {
        session.increment().unwrap();
    }
    assert_eq!(
        session.navigation_state().unwrap().current_level,
        expected_level
    );
}

#[test_case(1, 10 ; "from level one")]
#[test_case(3, 10 ; "from the bottom")]
fn repeated_decrements_never_go_below_zero(down_from: usize, steps: usize) {
    let mut session = session();
    for _ in 0..down_from {
        session.increment().unwrap();
    }
    for _ in 0..steps {
        session.decrement().unwrap();
    }
    assert_eq!(session.navigation_state().unwrap().current_level, 0);
    assert_eq!(session.composition(), keys(&["root"]).as_slice());
}

#[test]
fn increment_then_decrement_retraces_levels() {
    let mut session = session();
    session.increment().unwrap();
    session.increment().unwrap();
    assert_eq!(session.composition(), keys(&["a1", "b1"]).as_slice());

    session.decrement().unwrap();
    assert_eq!(session.navigation_state().unwrap().current_level, 1);
    assert_eq!(session.composition(), keys(&["a", "b"]).as_slice());
}

#[test]
fn jump_to_root_from_any_level() {
    let mut session = session();
    for _ in 0..3 {
        session.increment().unwrap();
    }
    let (_, request) = session.jump_to_root().unwrap();
    assert_eq!(session.navigation_state().unwrap().current_level, 0);
    assert_eq!(request.compose, keys(&["root"]));
}

#[test]
fn clicking_a_decomposable_node_descends_into_it() {
    let mut session = session();
    session.increment().unwrap();

    // "a" sits at level 1 and decomposes into a1
    let (_, request) = session.select_node("a").unwrap();
    assert_eq!(session.navigation_state().unwrap().current_level, 2);
    assert_eq!(request.compose, keys(&["a1"]));
}

#[test]
fn clicking_a_leaf_at_max_level_reemits_the_current_composition() {
    let mut session = session();
    for _ in 0..3 {
        session.increment().unwrap();
    }
    let before = session.composition().to_vec();

    let (_, request) = session.select_node("a11").unwrap();
    assert_eq!(session.navigation_state().unwrap().current_level, 3);
    assert_eq!(request.compose, before);
}

#[test]
fn clicking_an_undecomposed_inner_node_does_not_advance() {
    let raw = r#"{
        "root": {"name": "r", "input": "x", "output": "y", "compose": ["a", "b"], "level": 0},
        "a": {"name": "a", "input": "x", "output": "m", "compose": [], "level": 1},
        "b": {"name": "b", "input": "m", "output": "y", "compose": ["b1"], "level": 1},
        "b1": {"name": "b1", "input": "m", "output": "y", "compose": [], "level": 2}
    }"#;
    let mut session = ViewerSession::new();
    session.load_catalog(raw, "partial.json").unwrap();
    session.increment().unwrap();
    let before = session.composition().to_vec();

    let (_, request) = session.select_node("a").unwrap();
    assert_eq!(session.navigation_state().unwrap().current_level, 1);
    assert_eq!(request.compose, before);
}

#[test]
fn navigating_a_partially_decomposed_tree_settles_short() {
    let raw = r#"{
        "root": {"name": "r", "input": "x", "output": "y", "compose": ["a", "b"], "level": 0},
        "a": {"name": "a", "input": "x", "output": "m", "compose": ["a1"], "level": 1},
        "b": {"name": "b", "input": "m", "output": "y", "compose": [], "level": 1},
        "a1": {"name": "a1", "input": "x", "output": "m", "compose": [], "level": 2}
    }"#;
    let mut session = ViewerSession::new();
    session.load_catalog(raw, "partial.json").unwrap();

    session.increment().unwrap();
    assert_eq!(session.navigation_state().unwrap().current_level, 1);

    // "b" has no decomposition, so level 2 cannot be reached
    session.increment().unwrap();
    assert_eq!(session.navigation_state().unwrap().current_level, 1);
    assert_eq!(session.composition(), keys(&["a", "b"]).as_slice());
    assert!(!session.pending_notices().is_empty());
}
