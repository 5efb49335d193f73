use anyhow::Result;
use gpui_plate_toolbar::{
    AllCapabilities, Document, DocumentError, EditorState, MarkRange, Node, Selection,
    SelectionQuery, SelectionToolbar, ToolbarHost, ToolbarOptions, ToolbarRender,
};

#[derive(Default)]
struct LinkHost {
    clicked: Vec<String>,
}

impl ToolbarHost for LinkHost {
    fn on_open(&mut self) {}

    fn on_close(&mut self) {}

    fn on_click_link(&mut self, href: &str) {
        self.clicked.push(href.to_string());
    }
}

fn linked() -> EditorState {
    let doc = Document::new(vec![Node::element(
        "paragraph",
        vec![
            Node::text("see "),
            Node::link("docs", "https://docs.example"),
            Node::text(" now"),
        ],
    )]);
    EditorState::new(doc, Selection::text(5, 9))
}

#[test]
fn committing_a_link_rerenders_the_editor() -> Result<()> {
    let mut toolbar = SelectionToolbar::new(ToolbarOptions::default(), LinkHost::default());
    let mut state = linked();
    toolbar.evaluate(&state, &AllCapabilities);

    toolbar.select_link(&mut state, 5..9, "https://example.com/new", &AllCapabilities)?;

    assert_eq!(
        toolbar.render(),
        &ToolbarRender::LinkEditor {
            range: MarkRange {
                from: 5,
                to: 9,
                href: "https://example.com/new".to_string(),
            },
        }
    );
    Ok(())
}

#[test]
fn linking_plain_text_merges_into_one_range() -> Result<()> {
    let mut state = linked();
    state.set_link(1..9, "https://docs.example")?;

    let range = state.link_range(2).map(|range| range.range());
    assert_eq!(range, Some(1..9));
    assert_eq!(state.doc().text_between(0, 14), "see docs now");
    Ok(())
}

#[test]
fn link_range_extends_across_split_text() -> Result<()> {
    let doc = Document::from_json(
        r#"{
            "children": [
                {
                    "node": "element",
                    "kind": "paragraph",
                    "children": [
                        { "node": "text", "text": "do", "marks": { "link": "https://x" } },
                        { "node": "text", "text": "cs", "marks": { "bold": true, "link": "https://x" } }
                    ]
                }
            ]
        }"#,
    )?;
    let state = EditorState::new(doc, Selection::caret(2));
    let range = state.link_range(2).map(|range| range.range());
    assert_eq!(range, Some(1..5));
    Ok(())
}

#[test]
fn removing_a_link_closes_the_editor() -> Result<()> {
    let mut toolbar = SelectionToolbar::new(ToolbarOptions::default(), LinkHost::default());
    let mut state = linked();
    toolbar.evaluate(&state, &AllCapabilities);

    state.remove_link(5..9)?;
    let render = toolbar.evaluate(&state, &AllCapabilities);
    assert!(matches!(render, ToolbarRender::Menu { .. }));
    assert!(!state.is_link_active());
    Ok(())
}

#[test]
fn removing_a_link_keeps_the_selection() -> Result<()> {
    let mut state = linked();
    state.remove_link(0..14)?;
    assert_eq!(state.selection(), &Selection::text(5, 9));
    assert_eq!(state.doc().text_between(0, 14), "see docs now");

    let err = state.remove_link(3..20).unwrap_err();
    assert!(matches!(err, DocumentError::OutOfRange { size: 14, .. }));
    assert_eq!(state.selection(), &Selection::text(5, 9));
    Ok(())
}

#[test]
fn out_of_range_link_is_rejected() {
    let mut toolbar = SelectionToolbar::new(ToolbarOptions::default(), LinkHost::default());
    let mut state = linked();
    let err = toolbar
        .select_link(&mut state, 5..40, "https://x", &AllCapabilities)
        .unwrap_err();
    assert!(matches!(err, DocumentError::OutOfRange { .. }));

    let err = state.set_link(9..5, "https://x").unwrap_err();
    assert!(matches!(err, DocumentError::InvalidRange { from: 9, to: 5 }));
}

#[test]
fn following_a_link_reaches_the_host() {
    let mut toolbar = SelectionToolbar::new(ToolbarOptions::default(), LinkHost::default());
    toolbar.click_link("https://docs.example");
    assert_eq!(toolbar.host().clicked, ["https://docs.example"]);
}
