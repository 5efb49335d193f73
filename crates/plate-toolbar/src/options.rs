use serde::{Deserialize, Serialize};

/// Per-editor toolbar settings supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarOptions {
    /// Right-to-left layout; swaps column insert directions.
    pub rtl: bool,
    /// The document is a template, enabling placeholder actions.
    pub is_template: bool,
    pub read_only: bool,
    /// Read-only viewers may still comment.
    pub can_comment: bool,
    pub can_update: bool,
    /// Touch layout: the toolbar stays active regardless of the selection.
    pub mobile: bool,
}

impl ToolbarOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn can_comment(mut self, can_comment: bool) -> Self {
        self.can_comment = can_comment;
        self
    }

    pub fn can_update(mut self, can_update: bool) -> Self {
        self.can_update = can_update;
        self
    }

    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn template(mut self, is_template: bool) -> Self {
        self.is_template = is_template;
        self
    }

    pub fn mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    /// Read-only viewers without comment permission get no toolbar at all.
    pub fn suppresses_toolbar(&self) -> bool {
        self.read_only && !self.can_comment
    }
}
