use serde::{Deserialize, Serialize};

use crate::document::Attrs;

/// One entry of the toolbar: an action or a visual separator between groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum MenuItem {
    Separator,
    Action(Action),
}

impl MenuItem {
    pub fn separator() -> Self {
        MenuItem::Separator
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator)
    }

    /// Command name backing the item. Separators and unnamed actions have
    /// none.
    pub fn name(&self) -> Option<&str> {
        match self {
            MenuItem::Separator => None,
            MenuItem::Action(action) => action.name.as_deref(),
        }
    }

    pub fn visible(&self) -> Option<bool> {
        match self {
            MenuItem::Separator => None,
            MenuItem::Action(action) => action.visible,
        }
    }

    pub fn as_action(&self) -> Option<&Action> {
        match self {
            MenuItem::Separator => None,
            MenuItem::Action(action) => Some(action),
        }
    }
}

impl From<Action> for MenuItem {
    fn from(action: Action) -> Self {
        MenuItem::Action(action)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Explicit visibility override. `None` means visible, except for
    /// `dimensions` which must opt in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub attrs: Attrs,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn attr(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }
}
