use tracing::debug;

use crate::capabilities::Capabilities;
use crate::menu::MenuItem;

/// Name of the one action that is hidden unless explicitly made visible.
pub const DIMENSIONS: &str = "dimensions";

/// Whether `item` survives capability and visibility filtering.
pub fn keep_item(item: &MenuItem, capabilities: &dyn Capabilities) -> bool {
    let action = match item {
        MenuItem::Separator => return true,
        MenuItem::Action(action) => action,
    };
    if action.name.as_deref() == Some(DIMENSIONS) {
        return action.visible.unwrap_or(false);
    }
    if let Some(name) = action.name.as_deref() {
        if !capabilities.has(name) {
            return false;
        }
    }
    action.visible != Some(false)
}

/// Collapses runs of separators into one and drops leading and trailing
/// separators.
pub fn filter_excess_separators(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut out: Vec<MenuItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.is_separator() && out.last().is_none_or(MenuItem::is_separator) {
            continue;
        }
        out.push(item);
    }
    if out.last().is_some_and(MenuItem::is_separator) {
        out.pop();
    }
    out
}

/// Drops unavailable and hidden actions, then tidies separators.
pub fn filter_items(items: Vec<MenuItem>, capabilities: &dyn Capabilities) -> Vec<MenuItem> {
    let before = items.len();
    let kept = items
        .into_iter()
        .filter(|item| keep_item(item, capabilities))
        .collect();
    let items = filter_excess_separators(kept);
    debug!(before, after = items.len(), "filtered toolbar items");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Action;

    fn names(items: &[MenuItem]) -> Vec<&str> {
        items
            .iter()
            .map(|item| item.name().unwrap_or("|"))
            .collect()
    }

    #[test]
    fn separators_are_kept_before_tidying() {
        assert!(keep_item(&MenuItem::separator(), &[] as &[&str; 0]));
    }

    #[test]
    fn unnamed_actions_skip_the_capability_check() {
        let item = MenuItem::from(Action::unnamed().label("Read only"));
        assert!(keep_item(&item, &[] as &[&str; 0]));
    }

    #[test]
    fn tidy_handles_only_separators() {
        let items = vec![MenuItem::separator(), MenuItem::separator()];
        assert!(filter_excess_separators(items).is_empty());
    }

    #[test]
    fn tidy_collapses_interior_runs() {
        let items = vec![
            MenuItem::separator(),
            Action::new("a").into(),
            MenuItem::separator(),
            MenuItem::separator(),
            Action::new("b").into(),
            MenuItem::separator(),
        ];
        assert_eq!(names(&filter_excess_separators(items)), ["a", "|", "b"]);
    }
}
