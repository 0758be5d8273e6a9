use super::*;
use pretty_assertions::assert_eq;

fn table() -> ClassTable<()> {
    ClassTable::new(SharedInterner::new())
}

#[test]
fn test_define_and_lookup() {
    let mut classes = table();
    let base = classes.define("Base", None, None).unwrap();
    let app = classes.define("::app::web", Some("base"), Some(())).unwrap();

    assert_eq!(classes.lookup("base"), Some(base));
    assert_eq!(classes.lookup("BASE"), Some(base));
    assert_eq!(classes.lookup("app::web"), Some(app));
    assert_eq!(classes.lookup("nope"), None);
    assert_eq!(classes.display_name(app), "app::web");
    assert!(classes.get(app).body().is_some());
    assert!(classes.get(base).body().is_none());
    assert_eq!(classes.len(), 2);
}

#[test]
fn test_duplicate_class_rejected() {
    let mut classes = table();
    classes.define("base", None, None).unwrap();
    let err = classes.define("Base", None, None).unwrap_err();
    assert_eq!(
        err,
        InheritanceError::DuplicateClass {
            class: "base".to_owned()
        }
    );
}

#[test]
fn test_main_class_display_name() {
    let mut classes = table();
    let main = classes.define("", None, None).unwrap();
    assert!(classes.get(main).is_main());
    assert_eq!(classes.display_name(main), "main");
}

#[test]
fn test_parent_resolved_lazily() {
    let mut classes = table();
    // Child declared before its parent.
    let app = classes.define("app", Some("base"), None).unwrap();
    let base = classes.define("base", None, None).unwrap();

    assert_eq!(classes.lookup_parent(app), Ok(Some(base)));
    assert_eq!(classes.lookup_parent(base), Ok(None));
}

#[test]
fn test_unknown_parent() {
    let mut classes = table();
    let app = classes.define("app", Some("missing"), None).unwrap();
    let err = classes.lookup_parent(app).unwrap_err();
    assert_eq!(err.to_string(), "could not find parent class 'missing' of class 'app'");
    assert!(classes.parent_chain(app).is_err());
}

#[test]
fn test_parent_chain_nearest_first() {
    let mut classes = table();
    let a = classes.define("a", None, None).unwrap();
    let b = classes.define("b", Some("a"), None).unwrap();
    let c = classes.define("c", Some("b"), None).unwrap();

    assert_eq!(classes.parent_chain(c).unwrap().as_slice(), &[b, a]);
    assert!(classes.parent_chain(a).unwrap().is_empty());
}

#[test]
fn test_parent_chain_detects_cycle() {
    let mut classes = table();
    let a = classes.define("a", Some("b"), None).unwrap();
    classes.define("b", Some("a"), None).unwrap();

    let err = classes.parent_chain(a).unwrap_err();
    assert_eq!(err.to_string(), "cyclic inheritance: a -> b -> a");
}

#[test]
fn test_parent_chain_detects_self_parent() {
    let mut classes = table();
    let a = classes.define("a", Some("a"), None).unwrap();
    assert_eq!(
        classes.parent_chain(a).unwrap_err(),
        InheritanceError::CyclicInheritance {
            chain: vec!["a".to_owned(), "a".to_owned()]
        }
    );
}

#[test]
fn test_child_of() {
    let mut classes = table();
    let a = classes.define("a", None, None).unwrap();
    let b = classes.define("b", Some("a"), None).unwrap();
    let c = classes.define("c", Some("b"), None).unwrap();

    assert!(classes.child_of(c, a));
    assert!(classes.child_of(c, b));
    assert!(classes.child_of(b, a));
    assert!(!classes.child_of(a, c));
    assert!(!classes.child_of(a, b));
    assert!(!classes.child_of(c, c));
}

#[test]
fn test_child_of_terminates_on_cycle() {
    let mut classes = table();
    let a = classes.define("a", Some("b"), None).unwrap();
    let b = classes.define("b", Some("a"), None).unwrap();
    let other = classes.define("other", None, None).unwrap();

    assert!(classes.child_of(a, b));
    assert!(!classes.child_of(a, other));
}

#[test]
fn test_child_of_unknown_parent_is_false() {
    let mut classes = table();
    let a = classes.define("a", Some("ghost"), None).unwrap();
    let b = classes.define("b", None, None).unwrap();
    assert!(!classes.child_of(a, b));
}
