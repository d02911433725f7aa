//! End-to-end behavior of the aliased value model.

use collection_literals::btree;
use jsonlight_core::{
    codec, compare, Access, Item, JsonArray, JsonError, JsonObject, Value,
};

fn obj(text: &str) -> JsonObject {
    JsonObject::from_str(text).unwrap()
}

// ============================================================================
// Aliasing
// ============================================================================

#[test]
fn fresh_navigation_observes_prior_writes() {
    let o = obj(r#"{"k": [1, 2]}"#);

    o.get_array("k").unwrap().push("x").unwrap();

    let again = o.get_array("k").unwrap();
    let last = again.len().unwrap() - 1;
    assert_eq!(again.get(last), Some(Value::from("x")));
}

#[test]
fn two_views_of_one_slot_see_each_other() {
    let o = obj(r#"{"inner": {}}"#);
    let first = o.get_object("inner").unwrap();
    let second = o.get_object("inner").unwrap();

    first.put("a", 1i64).unwrap();
    assert_eq!(second.get_long("a").unwrap(), 1);
}

#[test]
fn overwriting_with_other_kind_expires_views() {
    let o = obj(r#"{"inner": {"a": 1}}"#);
    let inner = o.get_object("inner").unwrap();

    o.put("inner", vec![1i64]).unwrap();

    assert!(inner.is_expired());
    assert_eq!(inner.len(), None);
    assert!(matches!(inner.get_long("a"), Err(JsonError::Expired { .. })));
}

#[test]
fn removing_a_slot_expires_views_beneath_it() {
    let o = obj(r#"{"a": {"b": {"c": []}}}"#);
    let c = o
        .get_object("a")
        .unwrap()
        .get_object("b")
        .unwrap()
        .get_array("c")
        .unwrap();

    o.remove("a");

    assert!(c.is_expired());
    assert_eq!(c.to_string(), "<EXPIREDARRAY>");
    assert!(matches!(c.push(1i64), Err(JsonError::Expired { .. })));
}

#[test]
fn reinserted_slot_revives_views() {
    let o = obj(r#"{"inner": {"a": 1}}"#);
    let inner = o.get_object("inner").unwrap();

    o.remove("inner");
    assert!(inner.is_expired());

    o.put("inner", btree! { "a".to_string() => Value::from(2i64) })
        .unwrap();
    assert_eq!(inner.get_long("a").unwrap(), 2);
}

#[test]
fn index_views_track_position_not_content() {
    let a = JsonArray::from_values(vec![Value::array(), Value::from(vec![1i64])]);
    let second = a.get_array(1).unwrap();

    a.remove(0);

    assert!(second.is_expired());
}

// ============================================================================
// Re-parenting
// ============================================================================

#[test]
fn put_moves_handle_between_parents() {
    let p1 = obj(r#"{"k1": [1, 2]}"#);
    let p2 = JsonObject::new();
    let a = p1.get_array("k1").unwrap();

    p2.put("k2", &a).unwrap();

    assert!(!p1.has("k1"));
    assert_eq!(p2.get_array("k2").unwrap().to_string(), "[1,2]");

    a.push(3i64).unwrap();
    assert_eq!(p2.to_string(), r#"{"k2":[1,2,3]}"#);
    assert!(!p1.has("k1"));
}

#[test]
fn clones_follow_a_moved_handle() {
    let p1 = obj(r#"{"k": {"v": 1}}"#);
    let p2 = JsonObject::new();
    let handle = p1.get_object("k").unwrap();
    let clone = handle.clone();

    p2.put("moved", handle).unwrap();

    clone.put("v", 2i64).unwrap();
    assert_eq!(p2.to_string(), r#"{"moved":{"v":2}}"#);
}

#[test]
fn views_through_a_moved_handle_follow_it() {
    let p1 = obj(r#"{"k": {"deep": {"v": 1}}}"#);
    let p2 = JsonObject::new();
    let k = p1.get_object("k").unwrap();
    let deep = k.get_object("deep").unwrap();

    p2.put("moved", &k).unwrap();

    deep.put("v", 9i64).unwrap();
    assert_eq!(p2.to_string(), r#"{"moved":{"deep":{"v":9}}}"#);
}

#[test]
fn move_to_later_sibling_compensates_shift() {
    let a = JsonArray::from_values(vec![
        Value::from(vec![1i64]),
        Value::from(vec![2i64]),
        Value::from(vec![3i64]),
    ]);
    let first = a.get_array(0).unwrap();
    let last = a.get_array(2).unwrap();

    last.push(&first).unwrap();

    assert_eq!(a.to_string(), "[[2],[3,[1]]]");
    last.push(4i64).unwrap();
    first.push(5i64).unwrap();
    assert_eq!(a.to_string(), "[[2],[3,[1,5],4]]");
}

#[test]
fn array_put_of_earlier_sibling_lands_on_requested_element() {
    let a = JsonArray::from_values(vec![
        Value::from(vec![1i64]),
        Value::from("x"),
        Value::from("y"),
    ]);
    let first = a.get_array(0).unwrap();

    let previous = a.put(2, &first).unwrap();

    assert_eq!(previous, Value::from("y"));
    assert_eq!(a.to_string(), r#"["x",[1]]"#);
    first.push(2i64).unwrap();
    assert_eq!(a.to_string(), r#"["x",[1,2]]"#);
}

// ============================================================================
// Detach
// ============================================================================

#[test]
fn detach_owning_is_noop() {
    let o = obj(r#"{"a": 1}"#);
    o.detach_from_parent();
    assert!(o.is_owning());
    assert_eq!(o.to_string(), r#"{"a":1}"#);
}

#[test]
fn detach_then_mutate_leaves_parent_alone() {
    let o = obj(r#"{"list": [1], "other": 2}"#);
    let list = o.get_array("list").unwrap();

    list.detach_from_parent();
    list.push(2i64).unwrap();

    assert!(list.is_owning());
    assert_eq!(list.to_string(), "[1,2]");
    assert_eq!(o.to_string(), r#"{"other":2}"#);
}

#[test]
fn detach_expired_view_degrades_to_empty() {
    let o = obj(r#"{"inner": {"a": 1}}"#);
    let inner = o.get_object("inner").unwrap();
    o.remove("inner");

    inner.detach_from_parent();

    assert!(inner.is_owning());
    assert_eq!(inner.to_string(), "{}");
}

// ============================================================================
// Self-reference
// ============================================================================

#[test]
fn array_put_into_own_slot_is_rejected() {
    let root = JsonArray::from_values(vec![Value::from(vec![1i64])]);
    let a = root.get_array(0).unwrap();

    assert!(matches!(root.put(0, &a), Err(JsonError::SelfReference)));
    assert!(matches!(a.put(0, &a), Err(JsonError::SelfReference)));
    assert_eq!(a.to_string(), "[1]");
    assert_eq!(root.to_string(), "[[1]]");
}

#[test]
fn object_put_into_itself_is_rejected() {
    let o = obj(r#"{"a": {}}"#);
    let a = o.get_object("a").unwrap();

    assert!(matches!(o.put("me", &o), Err(JsonError::SelfReference)));
    assert!(matches!(a.put("parent", &o), Err(JsonError::SelfReference)));
    assert_eq!(o.to_string(), r#"{"a":{}}"#);
}

#[test]
fn moving_an_expired_handle_fails() {
    let o = obj(r#"{"a": {}}"#);
    let a = o.get_object("a").unwrap();
    o.remove("a");

    let target = JsonObject::new();
    assert!(matches!(target.put("x", &a), Err(JsonError::ExpiredSource)));
    assert!(target.is_empty());
}

// ============================================================================
// Append
// ============================================================================

#[test]
fn appending_an_element_of_the_same_array() {
    let arr = JsonArray::from_values(vec![10i64.into(), 20i64.into(), 30i64.into()]);

    arr.push(arr.get(1).unwrap()).unwrap();

    assert_eq!(arr.len(), Some(4));
    assert_eq!(arr.to_string(), "[10,20,30,20]");
}

#[test]
fn appending_several_siblings_keeps_argument_order() {
    let arr = JsonArray::from_values(vec![
        Value::from(vec!["a"]),
        Value::from(vec!["b"]),
        Value::from(0i64),
    ]);
    let a = arr.get_array(0).unwrap();
    let b = arr.get_array(1).unwrap();

    arr.append([Item::from(&b), Item::from(&a), Item::from(1i64)])
        .unwrap();

    assert_eq!(arr.to_string(), r#"[0,["b"],["a"],1]"#);
    a.push("a2").unwrap();
    b.push("b2").unwrap();
    assert_eq!(arr.to_string(), r#"[0,["b","b2"],["a","a2"],1]"#);
}

#[test]
fn appending_siblings_in_index_order() {
    let arr = JsonArray::from_values(vec![
        Value::from(vec![1i64]),
        Value::from(vec![2i64]),
        Value::from(vec![3i64]),
    ]);
    let a0 = arr.get_array(0).unwrap();
    let a1 = arr.get_array(1).unwrap();

    arr.append([&a0, &a1]).unwrap();

    assert_eq!(arr.to_string(), "[[3],[1],[2]]");
    assert_eq!(a0.to_string(), "[1]");
    assert_eq!(a1.to_string(), "[2]");
}

#[test]
fn appending_from_another_array_in_index_order() {
    let src = JsonArray::from_values(vec![
        Value::from(vec![1i64]),
        Value::from(vec![2i64]),
        Value::from(vec![3i64]),
    ]);
    let dst = JsonArray::new();
    let s0 = src.get_array(0).unwrap();
    let s2 = src.get_array(2).unwrap();

    dst.append([Item::from(&s0), Item::from("mid"), Item::from(&s2)])
        .unwrap();

    assert_eq!(dst.to_string(), r#"[[1],"mid",[3]]"#);
    assert_eq!(src.to_string(), "[[2]]");
    s2.push(4i64).unwrap();
    assert_eq!(dst.to_string(), r#"[[1],"mid",[3,4]]"#);
}

#[test]
fn failed_append_leaves_both_arrays_alone() {
    let src = JsonArray::from_values(vec![Value::from(vec![1i64]), Value::from(vec![2i64])]);
    let dst = JsonArray::from_values(vec![Value::from(0i64)]);
    let s0 = src.get_array(0).unwrap();
    let ghost = src.get_array(1).unwrap();
    src.put(1, "scalar").unwrap();

    let result = dst.append([&s0, &ghost]);

    assert!(matches!(result, Err(JsonError::ExpiredSource)));
    assert_eq!(src.to_string(), r#"[[1],"scalar"]"#);
    assert_eq!(dst.to_string(), "[0]");
    assert_eq!(s0.to_string(), "[1]");
}

#[test]
fn append_to_nested_array_from_earlier_sibling() {
    let root = obj(r#"{"rows": [[1], [2]]}"#);
    let rows = root.get_array("rows").unwrap();
    let first = rows.get_array(0).unwrap();
    let second = rows.get_array(1).unwrap();

    second.push(&first).unwrap();

    assert_eq!(root.to_string(), r#"{"rows":[[2,[1]]]}"#);
    assert_eq!(second.to_string(), "[2,[1]]");
}

// ============================================================================
// Opt
// ============================================================================

#[test]
fn opt_never_fails() {
    let o = obj(r#"{"s": "x", "n": null, "f": 1.5, "l": [1]}"#);
    let l = o.get_array("l").unwrap();
    o.remove("l");

    for key in ["s", "n", "f", "l", "missing"] {
        let _ = o.opt(key);
        let _ = o.opt_bool(key);
        let _ = o.opt_string(key);
        let _ = o.opt_double(key);
        let _ = o.opt_int(key);
        let _ = o.opt_long(key);
        assert!(o.opt_array(key).len().is_some());
        assert!(o.opt_object(key).len().is_some());
    }
    for index in 0..3 {
        assert_eq!(l.opt_long_or(index, -1), -1);
        assert_eq!(l.opt(index), Value::Null);
    }

    assert_eq!(o.opt_double("f"), 1.5);
    assert_eq!(o.opt_long("f"), 0);
    assert_eq!(o.opt_string_or("n", "dflt"), "dflt");
}

// ============================================================================
// Diff and codec
// ============================================================================

#[test]
fn diff_scenario() {
    let old = obj(r#"{"a":1,"b":2,"c":3}"#);
    let new = obj(r#"{"b":2,"c":4,"d":5}"#);

    let diff = compare(&old, &new).unwrap();

    assert_eq!(diff.deleted.to_string(), r#"{"a":1}"#);
    assert_eq!(diff.created.to_string(), r#"{"d":5}"#);
    assert_eq!(diff.modified.to_string(), r#"{"c":4}"#);
    assert_eq!(diff.unchanged.to_string(), r#"{"b":2}"#);
}

#[test]
fn encode_decode_roundtrip() {
    let v = Value::Object(btree! {
        "null".to_string() => Value::Null,
        "bool".to_string() => Value::Bool(false),
        "int".to_string() => Value::Integer(i64::MIN),
        "float".to_string() => Value::Float(-0.25),
        "string".to_string() => Value::from("ünïcode \"q\""),
        "array".to_string() => Value::from(vec![Value::from(1i64), Value::array(), Value::object()]),
        "object".to_string() => Value::Object(btree! {
            "nested".to_string() => Value::from(vec![1.5f64, 2.0]),
        }),
    });

    let compact = codec::encode(&v, None).unwrap();
    assert_eq!(codec::decode(&compact).unwrap(), v);

    let pretty = codec::encode(&v, Some(3)).unwrap();
    assert_eq!(codec::decode(&pretty).unwrap(), v);
}

#[test]
fn handle_json_matches_codec() {
    let o = obj(r#"{"b": [true], "a": "s"}"#);
    let expected = codec::encode(&o.to_value().unwrap(), Some(2)).unwrap();
    assert_eq!(o.to_bytes(Some(2)).unwrap(), expected);
    assert_eq!(o.to_json(None).unwrap(), r#"{"a":"s","b":[true]}"#);
}
