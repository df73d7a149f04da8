use std::borrow::Cow;
use std::rc::Rc;

use serde_json::{json, Value};
use snapshot::{Field, SnapshotError, SnapshotList, SnapshotValue, StoreObject};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn json_list() -> SnapshotList<Value, Value> {
    SnapshotList::with_factory(|raw| raw)
}

fn snapshot(items: &[Rc<Value>]) -> Vec<Value> {
    items.iter().map(|item| (**item).clone()).collect()
}

#[test]
fn delete_then_undo_scenario() {
    init_logger();
    let mut list = json_list();
    list.create(vec![json!({"id": 1}), json!({"id": 2})]);

    list.delete("id", &json!(1));
    assert_eq!(snapshot(list.items()), vec![json!({"id": 2})]);
    assert_eq!(
        list.history().map(snapshot),
        Some(vec![json!({"id": 1}), json!({"id": 2})])
    );

    list.undo();
    assert_eq!(snapshot(list.items()), vec![json!({"id": 1}), json!({"id": 2})]);
    assert!(list.history().is_none());
}

#[test]
fn scalar_change_then_undo_scenario() {
    init_logger();
    let mut value = SnapshotValue::new();
    value.create(json!(5));

    value.change(json!(10));
    assert_eq!(value.value(), Some(&json!(10)));
    assert_eq!(value.history(), Some(&json!(5)));

    value.undo();
    assert_eq!(value.value(), Some(&json!(5)));
    assert_eq!(value.history(), None);
}

#[test]
fn save_then_undo_is_noop() {
    let mut list = json_list();
    list.create(vec![json!({"id": 1})]);
    list.append(json!({"id": 2}));
    list.save();
    let committed = snapshot(list.items());

    list.undo();
    assert_eq!(snapshot(list.items()), committed);

    let mut value = SnapshotValue::new();
    value.create(1);
    value.change(2);
    value.save();
    value.undo();
    assert_eq!(value.value(), Some(&2));
}

#[test]
fn stage_then_discard_leaves_items_unchanged() {
    let mut list = json_list();
    list.create(vec![json!({"id": 1})]);
    let before = snapshot(list.items());

    list.stage_insert(json!({"id": 2}));
    list.discard_staged_insert();
    assert_eq!(snapshot(list.items()), before);
    assert!(list.pending().is_none());
}

#[test]
fn stage_then_commit_adds_exactly_one_at_front() {
    let mut list = json_list();
    list.create(vec![json!({"id": 1})]);

    list.stage_insert(json!({"id": 2}));
    list.commit_staged_insert();
    assert_eq!(snapshot(list.items()), vec![json!({"id": 2}), json!({"id": 1})]);

    list.commit_staged_insert();
    assert_eq!(list.len(), 2);
}

#[test]
fn add_undo_add_save_keeps_one_item() {
    let mut list = json_list();
    list.create(Vec::new());

    list.add(json!({"id": "x"}));
    list.undo();
    list.add(json!({"id": "x"}));
    list.save();

    assert_eq!(snapshot(list.items()), vec![json!({"id": "x"})]);
    assert!(!list.is_dirty());
}

#[test]
fn sort_only_then_undo_is_noop() {
    let mut list = json_list();
    list.create(vec![json!({"n": 3}), json!({"n": 1}), json!({"n": 2})]);
    list.sort_in_place(|a, b| a["n"].as_u64().cmp(&b["n"].as_u64()));
    list.reverse_in_place();
    assert!(list.history().is_none());

    list.undo();
    assert_eq!(
        snapshot(list.items()),
        vec![json!({"n": 3}), json!({"n": 2}), json!({"n": 1})]
    );
}

#[test]
fn reset_clears_loaded_and_history() {
    let mut list = json_list();
    list.create(vec![json!({"id": 1})]);
    assert!(list.is_loaded());
    list.delete("id", &json!(1));

    list.reset();
    assert!(!list.is_loaded());
    assert!(list.is_empty());
    assert_eq!(list.find_in_history("id", &json!(1)), Err(SnapshotError::NoHistory));

    list.undo();
    assert!(list.is_empty());
}

#[test]
fn default_factory_wraps_in_store_object() {
    init_logger();
    let mut list = SnapshotList::new();
    list.create(vec![json!({"id": 1, "name": "one"}), json!({"id": 2, "name": "two"})]);

    let added = list.add(json!({"id": 3, "name": "three"}));
    assert_eq!(*added, StoreObject::new(json!({"id": 3, "name": "three"})));

    let found = list.find("id", &json!(2)).expect("item with id 2");
    assert_eq!(found.data["name"], json!("two"));

    list.delete("name", &json!("one"));
    assert_eq!(list.len(), 2);
    assert!(list.find_in_history("id", &json!(1)).unwrap().is_some());

    list.undo();
    assert_eq!(list.len(), 2);
    assert!(list.find("id", &json!(3)).is_none());
}

#[test]
fn default_factory_matches_whole_value_on_data_key() {
    let mut list = SnapshotList::new();
    list.create(vec!["a", "b", "a"]);
    list.delete("data", &json!("a"));
    assert_eq!(list.map(|obj| obj.data), vec!["b"]);
}

#[derive(Debug, Clone, PartialEq)]
struct Task {
    id: u32,
    title: String,
}

impl Field for Task {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        match key {
            "id" => Some(Cow::Owned(Value::from(self.id))),
            "title" => Some(Cow::Owned(Value::from(self.title.clone()))),
            _ => None,
        }
    }
}

#[test]
fn custom_item_type_with_display_sort() {
    let mut list = SnapshotList::with_factory(|(id, title): (u32, &'static str)| Task {
        id,
        title: title.to_string(),
    })
    .with_sort(|items| {
        let mut sorted = items.to_vec();
        sorted.sort_by(|a, b| a.title.cmp(&b.title));
        sorted
    });

    list.create(vec![(1, "write"), (2, "review")]);
    list.append((3, "deploy"));

    let titles: Vec<String> = list.all().iter().map(|task| task.title.clone()).collect();
    assert_eq!(titles, vec!["deploy", "review", "write"]);
    assert_eq!(list.map(|task| task.id), vec![1, 2, 3]);

    let staged = list.stage_insert((4, "plan"));
    assert_eq!(staged.id, 4);
    assert_eq!(list.find("title", &json!("plan")).map(|task| task.id), Some(4));

    list.undo();
    assert_eq!(list.map(|task| task.id), vec![1, 2]);
    assert!(list.pending().is_some());
}

#[test]
fn delete_matches_float_field_against_integer() {
    let mut list = json_list();
    list.create(vec![json!({"id": 1.0}), json!({"id": 2})]);

    list.delete("id", &json!(1));
    assert_eq!(snapshot(list.items()), vec![json!({"id": 2})]);
    assert!(list.find_in_history("id", &json!(1)).unwrap().is_some());
    assert!(list.find("id", &json!(2.0)).is_some());
}
