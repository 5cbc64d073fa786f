#![allow(unused_imports, dead_code, unused_variables)]

use super::attr::*;

#[test]
fn set_get_roundtrip() {
  let mut attrs = AttrStore::new();
  attrs.set("text", "hello");
  assert_eq!(attrs.get("text").unwrap().value(), "hello");
  assert!(attrs.get("nosuch").is_none());
}

#[test]
fn replace_in_place_keeps_id_and_order() {
  let mut attrs = AttrStore::new();
  attrs.set("a", "1");
  attrs.set("b", "2");
  let a_id = attrs.get("a").unwrap().id();

  attrs.set("a", "3");
  assert_eq!(attrs.get("a").unwrap().value(), "3");
  assert_eq!(attrs.get("a").unwrap().id(), a_id);
  assert_eq!(attrs.len(), 2);

  // Newest first: "b" was set after "a", a replacement does not reorder.
  let keys: Vec<&str> = attrs.iter().map(|kv| kv.key()).collect();
  assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn one_entry_per_key() {
  let mut attrs = AttrStore::new();
  attrs.set("k", "1");
  attrs.set("k", "2");
  attrs.set("k", "3");
  assert_eq!(attrs.len(), 1);
  assert_eq!(attrs.get("k").unwrap().value(), "3");
}

#[test]
fn entry_ids_unique() {
  let mut attrs = AttrStore::new();
  attrs.set("a", "1");
  attrs.set("b", "2");
  attrs.set("c", "3");
  let mut ids: Vec<i32> = attrs.iter().map(|kv| kv.id()).collect();
  ids.sort_unstable();
  ids.dedup();
  assert_eq!(ids.len(), 3);
}

#[test]
fn named_entries() {
  let mut attrs = AttrStore::new();
  attrs.set_named("text", "hello", Some("greeting".into()));
  assert_eq!(attrs.get_by_name("greeting").unwrap().value(), "hello");

  assert!(attrs.set_by_name("greeting", "bye"));
  assert_eq!(attrs.get("text").unwrap().value(), "bye");

  assert!(!attrs.set_by_name("nosuch", "x"));
}

#[test]
fn int_prefix_parsing() {
  assert_eq!(parse_int_prefix("42"), Some(42));
  assert_eq!(parse_int_prefix("  42"), Some(42));
  assert_eq!(parse_int_prefix("-7"), Some(-7));
  assert_eq!(parse_int_prefix("+7"), Some(7));
  assert_eq!(parse_int_prefix("12abc"), Some(12));
  assert_eq!(parse_int_prefix(""), None);
  assert_eq!(parse_int_prefix("abc"), None);
  assert_eq!(parse_int_prefix("-"), None);
}
