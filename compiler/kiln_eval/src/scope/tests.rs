use super::*;
use kiln_ir::SharedInterner;
use pretty_assertions::assert_eq;

fn webserver(interner: &SharedInterner) -> Resource {
    Resource::new(interner.intern("class"), interner.intern("webserver"))
}

#[test]
fn test_new_tree_has_top_scope() {
    let tree = ScopeTree::new();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.top(), ScopeId::TOP);
    assert_eq!(tree.parent(ScopeId::TOP), None);
    assert!(tree.resource(ScopeId::TOP).is_none());
    assert!(tree.namespaces(ScopeId::TOP).is_empty());
}

#[test]
fn test_subscope_links_parent_and_resource() {
    let interner = SharedInterner::new();
    let resource = webserver(&interner);
    let mut tree = ScopeTree::new();

    let outer = tree.subscope(ScopeId::TOP, resource);
    let inner = tree.subscope(outer, resource);

    assert_eq!(tree.parent(outer), Some(ScopeId::TOP));
    assert_eq!(tree.parent(inner), Some(outer));
    assert_eq!(tree.resource(inner), Some(&resource));
    assert_eq!(
        tree.ancestors(inner).collect::<Vec<_>>(),
        vec![inner, outer, ScopeId::TOP]
    );
}

#[test]
fn test_subscope_starts_without_namespaces() {
    let interner = SharedInterner::new();
    let mut tree = ScopeTree::new();
    tree.add_namespace(ScopeId::TOP, interner.intern("apache"));

    let child = tree.subscope(ScopeId::TOP, webserver(&interner));
    assert!(tree.namespaces(child).is_empty());
}

#[test]
fn test_add_namespace_dedups_and_keeps_order() {
    let interner = SharedInterner::new();
    let apache = interner.intern("apache");
    let php = interner.intern("php");
    let mut tree = ScopeTree::new();

    tree.add_namespace(ScopeId::TOP, apache);
    tree.add_namespace(ScopeId::TOP, php);
    tree.add_namespace(ScopeId::TOP, apache);

    assert_eq!(tree.namespaces(ScopeId::TOP), &[apache, php]);
}

#[test]
fn test_define_and_lookup_through_parents() {
    let interner = SharedInterner::new();
    let port = interner.intern("port");
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::TOP, port, Value::string("80")).unwrap();

    let child = tree.subscope(ScopeId::TOP, webserver(&interner));
    assert_eq!(tree.lookup(child, port), Some(&Value::string("80")));
    assert_eq!(tree.lookup_local(child, port), None);
}

#[test]
fn test_child_binding_shadows_parent() {
    let interner = SharedInterner::new();
    let port = interner.intern("port");
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::TOP, port, Value::string("80")).unwrap();

    let child = tree.subscope(ScopeId::TOP, webserver(&interner));
    tree.define(child, port, Value::string("443")).unwrap();

    assert_eq!(tree.lookup(child, port), Some(&Value::string("443")));
    assert_eq!(tree.lookup(ScopeId::TOP, port), Some(&Value::string("80")));
}

#[test]
fn test_reassignment_in_same_scope_fails() {
    let interner = SharedInterner::new();
    let port = interner.intern("port");
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::TOP, port, Value::Bool(true)).unwrap();

    assert_eq!(
        tree.define(ScopeId::TOP, port, Value::Bool(false)),
        Err(ScopeError::Reassignment { name: port })
    );
    assert_eq!(tree.lookup(ScopeId::TOP, port), Some(&Value::Bool(true)));
}

#[test]
fn test_lookup_missing_variable() {
    let interner = SharedInterner::new();
    let tree = ScopeTree::new();
    assert_eq!(tree.lookup(ScopeId::TOP, interner.intern("nope")), None);
}
