use std::cell::RefCell;

use gpui_plate_toolbar::{
    Action, DefaultMenus, Dictionary, Document, EditorState, MenuItem, MenuProducers, Node,
    Selection, ToolbarContext, ToolbarOptions, filter_items, resolve_items,
};

/// Records which producer ran and with which arguments.
#[derive(Default)]
struct RecordingProducers {
    calls: RefCell<Vec<String>>,
}

impl RecordingProducers {
    fn record(&self, call: impl Into<String>) -> Vec<MenuItem> {
        self.calls.borrow_mut().push(call.into());
        vec![Action::new("noop").into()]
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl MenuProducers for RecordingProducers {
    fn formatting(
        &self,
        _state: &EditorState,
        is_template: bool,
        is_mobile: bool,
        _dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        self.record(format!("formatting template={is_template} mobile={is_mobile}"))
    }

    fn code(&self, _state: &EditorState, read_only: bool, _dictionary: &Dictionary) -> Vec<MenuItem> {
        self.record(format!("code read_only={read_only}"))
    }

    fn notice(
        &self,
        _state: &EditorState,
        read_only: bool,
        _dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        self.record(format!("notice read_only={read_only}"))
    }

    fn read_only(
        &self,
        _state: &EditorState,
        can_update: bool,
        _dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        self.record(format!("read_only can_update={can_update}"))
    }

    fn table(&self, _state: &EditorState, _dictionary: &Dictionary) -> Vec<MenuItem> {
        self.record("table")
    }

    fn table_column(
        &self,
        _state: &EditorState,
        index: usize,
        rtl: bool,
        _dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        self.record(format!("table_column index={index} rtl={rtl}"))
    }

    fn table_row(
        &self,
        _state: &EditorState,
        index: usize,
        _dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        self.record(format!("table_row index={index}"))
    }

    fn table_cell(&self, _state: &EditorState, _dictionary: &Dictionary) -> Vec<MenuItem> {
        self.record("table_cell")
    }

    fn image(&self, _state: &EditorState, _dictionary: &Dictionary) -> Vec<MenuItem> {
        self.calls.borrow_mut().push("image".to_string());
        vec![
            Action::new("download").into(),
            Action::new("replace").into(),
            Action::new("delete").into(),
        ]
    }

    fn attachment(&self, _state: &EditorState, _dictionary: &Dictionary) -> Vec<MenuItem> {
        self.record("attachment")
    }

    fn divider(&self, _state: &EditorState, _dictionary: &Dictionary) -> Vec<MenuItem> {
        self.record("divider")
    }
}

fn blank_state() -> EditorState {
    EditorState::new(
        Document::new(vec![Node::paragraph("a")]),
        Selection::caret(1),
    )
}

fn names(items: &[MenuItem]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.name().unwrap_or("|"))
        .collect()
}

#[test]
fn image_actions_follow_capabilities() {
    let producers = RecordingProducers::default();
    let items = resolve_items(
        ToolbarContext::Image,
        &blank_state(),
        &ToolbarOptions::default(),
        &producers,
        &Dictionary::default(),
    );
    let items = filter_items(items, &["download", "delete"]);
    assert_eq!(names(&items), ["download", "delete"]);
}

#[test]
fn read_only_media_skips_the_producer() {
    let producers = RecordingProducers::default();
    let options = ToolbarOptions::default().read_only(true).can_comment(true);
    for context in [ToolbarContext::Image, ToolbarContext::Attachment] {
        let items = resolve_items(
            context,
            &blank_state(),
            &options,
            &producers,
            &Dictionary::default(),
        );
        assert!(items.is_empty());
    }
    assert!(producers.calls().is_empty());
}

#[test]
fn contexts_forward_their_arguments() {
    let producers = RecordingProducers::default();
    let options = ToolbarOptions::default()
        .rtl(true)
        .template(true)
        .mobile(true)
        .can_update(true);
    let state = blank_state();
    let dictionary = Dictionary::default();

    for context in [
        ToolbarContext::Formatting,
        ToolbarContext::Code,
        ToolbarContext::Notice,
        ToolbarContext::ReadOnly,
        ToolbarContext::Table,
        ToolbarContext::TableColumn { index: 2 },
        ToolbarContext::TableRow { index: 0 },
        ToolbarContext::TableCell,
        ToolbarContext::Attachment,
        ToolbarContext::Divider,
    ] {
        resolve_items(context, &state, &options, &producers, &dictionary);
    }

    assert_eq!(
        producers.calls(),
        [
            "formatting template=true mobile=true",
            "code read_only=false",
            "notice read_only=false",
            "read_only can_update=true",
            "table",
            "table_column index=2 rtl=true",
            "table_row index=0",
            "table_cell",
            "attachment",
            "divider",
        ]
    );
}

#[test]
fn resolution_is_idempotent() {
    let state = EditorState::new(
        Document::new(vec![Node::paragraph("hello")]),
        Selection::text(1, 6),
    );
    let options = ToolbarOptions::default();
    let dictionary = Dictionary::default();
    let first = resolve_items(
        ToolbarContext::Formatting,
        &state,
        &options,
        &DefaultMenus,
        &dictionary,
    );
    let second = resolve_items(
        ToolbarContext::Formatting,
        &state,
        &options,
        &DefaultMenus,
        &dictionary,
    );
    assert_eq!(first, second);
}

#[test]
fn first_row_cannot_insert_above() {
    let state = EditorState::new(
        Document::new(vec![Node::table([["a", "b"], ["c", "d"]])]),
        Selection::cells(2, 7),
    );
    let dictionary = Dictionary::default();
    let items = DefaultMenus.table_row(&state, 0, &dictionary);
    let before = items
        .iter()
        .find(|item| item.name() == Some("add_row_before"))
        .and_then(MenuItem::visible);
    assert_eq!(before, Some(false));

    let items = DefaultMenus.table_row(&state, 1, &dictionary);
    let before = items
        .iter()
        .find(|item| item.name() == Some("add_row_before"))
        .and_then(MenuItem::visible);
    assert_ne!(before, Some(false));
}

#[test]
fn image_dimensions_show_once_sized() {
    let dictionary = Dictionary::default();
    let doc = Document::new(vec![
        Node::paragraph("a"),
        Node::image("https://example.com/a.png").with_attr("width", 320),
    ]);
    let state = EditorState::new(doc, Selection::node(3));
    let items = filter_items(
        DefaultMenus.image(&state, &dictionary),
        &gpui_plate_toolbar::AllCapabilities,
    );
    assert!(names(&items).contains(&"dimensions"));

    let doc = Document::new(vec![
        Node::paragraph("a"),
        Node::image("https://example.com/a.png"),
    ]);
    let state = EditorState::new(doc, Selection::node(3));
    let items = filter_items(
        DefaultMenus.image(&state, &dictionary),
        &gpui_plate_toolbar::AllCapabilities,
    );
    assert!(!names(&items).contains(&"dimensions"));
}

#[test]
fn dictionary_labels_reach_tooltips() {
    let dictionary: Dictionary =
        serde_json::from_str(r#"{ "strong": "Fett" }"#).unwrap();
    let state = EditorState::new(
        Document::new(vec![Node::paragraph("hello")]),
        Selection::text(1, 6),
    );
    let items = DefaultMenus.formatting(&state, false, false, &dictionary);
    let strong = items
        .iter()
        .filter_map(MenuItem::as_action)
        .find(|action| action.name.as_deref() == Some("strong"))
        .and_then(|action| action.tooltip.as_deref());
    assert_eq!(strong, Some("Fett"));
}
