use std::collections::{HashMap, HashSet};

use gpui_plate_toolbar::{Action, AllCapabilities, Capabilities, MenuItem, filter_items};

fn names(items: &[MenuItem]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.name().unwrap_or("|"))
        .collect()
}

fn action(name: &str) -> MenuItem {
    Action::new(name).into()
}

#[test]
fn missing_capability_drops_the_action() {
    let items = vec![action("download"), action("replace"), action("delete")];
    let filtered = filter_items(items, &["download", "delete"]);
    assert_eq!(names(&filtered), ["download", "delete"]);
}

#[test]
fn capability_map_with_false_entry_counts_as_absent() {
    let caps: HashMap<String, bool> = [("strong".to_string(), true), ("em".to_string(), false)]
        .into_iter()
        .collect();
    let filtered = filter_items(vec![action("strong"), action("em")], &caps);
    assert_eq!(names(&filtered), ["strong"]);
}

#[test]
fn explicitly_hidden_actions_are_dropped() {
    let items = vec![
        Action::new("strong").visible(false).into(),
        Action::new("em").visible(true).into(),
        action("code_inline"),
    ];
    let filtered = filter_items(items, &AllCapabilities);
    assert_eq!(names(&filtered), ["em", "code_inline"]);
}

#[test]
fn dimensions_must_opt_in() {
    let hidden = filter_items(vec![action("dimensions")], &AllCapabilities);
    assert!(hidden.is_empty());

    let shown = filter_items(
        vec![Action::new("dimensions").visible(true).into()],
        &[] as &[&str; 0],
    );
    assert_eq!(names(&shown), ["dimensions"]);
}

#[test]
fn lone_default_dimensions_item_leaves_nothing() {
    let items = vec![
        MenuItem::separator(),
        action("dimensions"),
        MenuItem::separator(),
    ];
    assert!(filter_items(items, &AllCapabilities).is_empty());
}

#[test]
fn unnamed_actions_survive_without_capabilities() {
    let items = vec![Action::unnamed().label("Viewing").into()];
    let caps: HashSet<String> = HashSet::new();
    assert_eq!(filter_items(items, &caps).len(), 1);
}

#[test]
fn separators_next_to_removed_items_collapse() {
    let items = vec![
        action("strong"),
        MenuItem::separator(),
        action("heading"),
        MenuItem::separator(),
        action("link"),
    ];
    let filtered = filter_items(items, &["strong", "link"]);
    assert_eq!(names(&filtered), ["strong", "|", "link"]);
}

#[test]
fn leading_and_trailing_separators_are_removed() {
    let items = vec![
        MenuItem::separator(),
        action("placeholder"),
        MenuItem::separator(),
        action("strong"),
        MenuItem::separator(),
        action("comment"),
    ];
    let filtered = filter_items(items, &["strong"]);
    assert_eq!(names(&filtered), ["strong"]);
}

fn assert_tidy(items: &[MenuItem], caps: &dyn Capabilities) {
    assert!(!items.first().is_some_and(MenuItem::is_separator));
    assert!(!items.last().is_some_and(MenuItem::is_separator));
    for pair in items.windows(2) {
        assert!(!(pair[0].is_separator() && pair[1].is_separator()));
    }
    for item in items {
        if let Some(name) = item.name() {
            if name != "dimensions" {
                assert!(caps.has(name), "{name} survived without capability");
            }
        }
        assert_ne!(item.visible(), Some(false));
    }
}

/// Every sequence of up to five items over a small alphabet.
#[test]
fn filtered_lists_are_always_tidy() {
    let alphabet: Vec<MenuItem> = vec![
        MenuItem::separator(),
        action("a"),
        action("b"),
        Action::new("a").visible(false).into(),
        action("dimensions"),
    ];
    let caps = ["a"];

    let mut sequences: Vec<Vec<MenuItem>> = vec![Vec::new()];
    for _ in 0..5 {
        let next: Vec<Vec<MenuItem>> = sequences
            .iter()
            .flat_map(|seq| {
                alphabet.iter().map(move |item| {
                    let mut seq = seq.clone();
                    seq.push(item.clone());
                    seq
                })
            })
            .collect();
        for seq in &next {
            let filtered = filter_items(seq.clone(), &caps);
            assert_tidy(&filtered, &caps);
            assert_eq!(filter_items(filtered.clone(), &caps), filtered);
        }
        sequences = next;
    }
}
