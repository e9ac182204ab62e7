//! Integration tests for the lookup table.
//!
//! These tests drive the table the way the completion engine does: register
//! classes, prepare a lookup run, then walk scopes and resolve types.

extern crate jslookup;

use jslookup::lookup::{same_object, JsObject, JsObjectType, LookupTable};

/// Helper to build a class with the given property names.
fn class(path: &str, properties: &[&str]) -> JsObjectType {
    let mut o = JsObject::ordinary(path);
    o.add_type(path, false);
    for p in properties {
        o.add_property(JsObject::ordinary(p).into_ref());
    }
    o.into_ref()
}

/// Helper to build a function scope declaring the given variables.
fn function(path: &str, variables: &[&str]) -> JsObjectType {
    let mut f = JsObject::function(path);
    for v in variables {
        f.add_variable(JsObject::ordinary(v).into_ref());
    }
    f.into_ref()
}

fn prepared_table(classes: Vec<JsObjectType>) -> LookupTable {
    let mut table = LookupTable::new();
    for c in classes {
        table.add_object(c);
    }
    table.prepare_lookup();
    table
}

// ── Scope stack ──────────────────────────────────────────────────────

#[test]
fn test_global_scope_is_never_removed() {
    let mut table = prepared_table(vec![]);
    table.push_scope(function("a", &[]));
    table.push_scope(function("b", &[]));
    for _ in 0..10 {
        table.pop_scope();
        let current = table.current_scope();
        assert!(current.borrow().is_function());
    }
    assert_eq!(table.scope_depth(), 1);
    assert!(table.current_scope().borrow().is_global_scope());
}

#[test]
fn test_push_filters_non_functions() {
    let mut table = prepared_table(vec![]);
    table.push_scope(function("f", &[]));
    let depth = table.scope_depth();
    table.push_scope(class("Plain", &[]));
    table.push_scope(table.new_object());
    assert_eq!(table.scope_depth(), depth);
    assert_eq!(table.current_path(), "f");
}

#[test]
fn test_visible_variables_innermost_wins() {
    let mut table = prepared_table(vec![]);
    let global_v = JsObject::ordinary("v").into_ref();
    table.global_scope().borrow_mut().add_variable(global_v.clone());

    let local = function("f", &["v", "onlyLocal"]);
    let local_v = local.borrow().as_function().unwrap().variables()["v"].clone();
    table.push_scope(local);

    let visible = table.visible_variables();
    assert!(same_object(&visible["v"], &local_v));
    assert!(!same_object(&visible["v"], &global_v));
    assert!(visible.contains_key("onlyLocal"));

    table.pop_scope();
    let visible = table.visible_variables();
    assert!(same_object(&visible["v"], &global_v));
    assert!(!visible.contains_key("onlyLocal"));
}

#[test]
fn test_isolation_round_trip() {
    let mut table = prepared_table(vec![]);
    let outer = function("outer", &["o"]);
    let inner = function("outer.inner", &["i"]);
    table.push_scope(outer.clone());
    table.push_scope(inner.clone());
    let before: Vec<JsObjectType> = table.scopes().to_vec();

    let target = function("elsewhere", &["t"]);
    table.set_temp_scope(target.clone());
    assert!(table.is_isolated());
    assert_eq!(table.scope_depth(), 2);
    assert_eq!(table.current_path(), "elsewhere");
    let visible = table.visible_variables();
    assert!(visible.contains_key("t"));
    assert!(!visible.contains_key("o"));
    assert!(!visible.contains_key("i"));

    table.push_scope(function("elsewhere.nested", &[]));
    table.swap_scopes();
    assert!(!table.is_isolated());
    let after = table.scopes();
    assert_eq!(after.len(), before.len());
    for (a, b) in after.iter().zip(before.iter()) {
        assert!(same_object(a, b));
    }
}

#[test]
fn test_isolated_stack_is_rebuilt_each_time() {
    let mut table = prepared_table(vec![]);
    table.set_temp_scope(function("first", &[]));
    table.push_scope(function("first.nested", &[]));
    assert_eq!(table.scope_depth(), 3);

    table.set_temp_scope(function("second", &[]));
    assert_eq!(table.scope_depth(), 2);
    assert!(same_object(&table.scopes()[0], &table.global_scope()));
}

#[test]
fn test_temp_scope_with_non_function_cancels_isolation() {
    let mut table = prepared_table(vec![]);
    table.push_scope(function("f", &[]));
    table.set_temp_scope(function("g", &[]));
    table.set_temp_scope(table.new_object());
    assert!(!table.is_isolated());
    assert_eq!(table.current_path(), "f");
}

#[test]
fn test_make_path_nested() {
    let mut table = prepared_table(vec![]);
    assert_eq!(table.make_path("Foo"), "Foo");
    table.push_scope(function("Foo", &[]));
    assert_eq!(table.make_path("bar"), "Foo.bar");
    table.push_scope(function(&table.make_path("bar"), &[]));
    assert_eq!(table.make_path("baz"), "Foo.bar.baz");
}

// ── Type resolution ──────────────────────────────────────────────────

#[test]
fn test_single_type_resolution_returns_identity() {
    let foo = class("Foo", &["a"]);
    let table = prepared_table(vec![foo.clone()]);
    let resolved = table.find_class("Foo").unwrap();
    assert!(same_object(&resolved, &foo));

    foo.borrow_mut().add_property(JsObject::ordinary("b").into_ref());
    assert!(resolved.borrow().properties().contains_key("b"));
}

#[test]
fn test_union_merge_is_order_stable_on_collisions() {
    let a = class("A", &["x"]);
    let b = class("B", &["x"]);
    let a_x = a.borrow().properties()["x"].clone();
    let b_x = b.borrow().properties()["x"].clone();
    let table = prepared_table(vec![a, b]);

    let ab = table.find_class("A|B").unwrap();
    assert!(same_object(&ab.borrow().properties()["x"], &a_x));

    let ba = table.find_class("B|A").unwrap();
    assert!(same_object(&ba.borrow().properties()["x"], &b_x));
}

#[test]
fn test_union_with_no_known_member_is_absent() {
    let table = prepared_table(vec![class("A", &[])]);
    assert!(table.find_class("X|Y").is_none());
    assert!(table.find_class("").is_none());
    assert!(table.find_class("|").is_none());
}

#[test]
fn test_union_flattens_inheritance() {
    let element = class("Element", &["innerHTML"]);
    element.borrow_mut().extends("Node");
    let node = class("Node", &["parentNode"]);
    let window = class("Window", &["alert"]);
    let table = prepared_table(vec![element, node, window]);

    let merged = table.find_class("Element|Window").unwrap();
    let merged = merged.borrow();
    for name in &["innerHTML", "parentNode", "alert"] {
        assert!(merged.properties().contains_key(*name), "missing {}", name);
    }
    assert!(merged.get_extends().contains("Node"));
    assert_eq!(merged.type_name(), "Element|Window");
}

#[test]
fn test_object_properties_include_inherited() {
    let element = class("Element", &["innerHTML"]);
    element.borrow_mut().extends("Node");
    element.borrow_mut().extends("Unknown");
    let node = class("Node", &["parentNode"]);
    let table = prepared_table(vec![element.clone(), node]);

    let props = table.object_properties(&element);
    assert_eq!(props.len(), 2);
    assert!(props.contains_key("parentNode"));
}

// ── Temporary classes ────────────────────────────────────────────────

#[test]
fn test_temp_type_names_are_unique_and_monotonic() {
    let mut table = LookupTable::new();
    let names: Vec<String> = (0..5)
        .map(|_| table.new_temp_object().borrow().type_name())
        .collect();
    assert_eq!(
        names,
        vec!["__object1", "__object2", "__object3", "__object4", "__object5"]
    );

    table.clear_temp_class_table();
    table.prepare_lookup();
    assert_eq!(table.new_temp_object().borrow().type_name(), "__object6");

    table.clear();
    assert_eq!(table.new_temp_object().borrow().type_name(), "__object1");
}

#[test]
fn test_temp_objects_resolve_by_generated_name() {
    let mut table = prepared_table(vec![]);
    let temp = table.new_temp_object();
    temp.borrow_mut()
        .add_property(JsObject::ordinary("inferred").into_ref());
    let name = temp.borrow().type_name();

    let resolved = table.find_class(&name).unwrap();
    assert!(same_object(&resolved, &temp));
    assert!(resolved.borrow().is_temp());
    assert!(!table.classes().contains_key(&name));
}

#[test]
fn test_clear_temp_keeps_permanent_classes() {
    let mut table = prepared_table(vec![class("Foo", &[])]);
    let temp_name = table.new_temp_object().borrow().type_name();
    table.clear_temp_class_table();
    assert!(table.find_class(&temp_name).is_none());
    assert!(table.find_class("Foo").is_some());
}

// ── Class table ownership ────────────────────────────────────────────

#[test]
fn test_adopt_with_move_empties_source() {
    let mut source = LookupTable::new();
    source.add_object(class("Foo", &[]));
    source.add_object(class("Bar", &[]));
    source.new_temp_object();

    let mut target = LookupTable::new();
    target.add_object(class("Old", &[]));
    target.copy_class_table(&mut source, true);

    assert!(source.classes().is_empty());
    assert!(source.temp_classes().is_empty());
    assert_eq!(target.classes().len(), 2);
    assert!(target.find_class("Old").is_none());
    assert!(target.find_class("__object1").is_some());
}

#[test]
fn test_adopt_without_move_shares_objects() {
    let foo = class("Foo", &[]);
    let mut source = LookupTable::new();
    source.add_object(foo.clone());

    let mut target = LookupTable::new();
    target.copy_class_table(&mut source, false);
    assert!(same_object(&source.find_class("Foo").unwrap(), &foo));
    assert!(same_object(&target.find_class("Foo").unwrap(), &foo));
}

#[test]
fn test_adopt_leaves_scopes_untouched() {
    let mut source = LookupTable::new();
    source.push_scope(function("s", &[]));

    let mut target = LookupTable::new();
    target.push_scope(function("t", &[]));
    target.copy_class_table(&mut source, true);

    assert_eq!(source.current_path(), "s");
    assert_eq!(target.current_path(), "t");
}

#[test]
fn test_register_same_path_replaces() {
    let first = class("Foo", &["old"]);
    let second = class("Foo", &["new"]);
    let table = prepared_table(vec![first, second.clone()]);
    assert_eq!(table.classes().len(), 1);
    let resolved = table.find_class("Foo").unwrap();
    assert!(same_object(&resolved, &second));
    assert!(!resolved.borrow().properties().contains_key("old"));
}
