use crate::dictionary::Dictionary;
use crate::document::Node;
use crate::menu::{Action, MenuItem};
use crate::selection::EditorState;

/// Builds the raw action list for each toolbar context.
///
/// Producers are pure: the same state and arguments yield the same list,
/// freshly allocated on every call.
pub trait MenuProducers {
    fn formatting(
        &self,
        state: &EditorState,
        is_template: bool,
        is_mobile: bool,
        dictionary: &Dictionary,
    ) -> Vec<MenuItem>;
    fn code(&self, state: &EditorState, read_only: bool, dictionary: &Dictionary) -> Vec<MenuItem>;
    fn notice(&self, state: &EditorState, read_only: bool, dictionary: &Dictionary)
    -> Vec<MenuItem>;
    fn read_only(
        &self,
        state: &EditorState,
        can_update: bool,
        dictionary: &Dictionary,
    ) -> Vec<MenuItem>;
    fn table(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem>;
    fn table_column(
        &self,
        state: &EditorState,
        index: usize,
        rtl: bool,
        dictionary: &Dictionary,
    ) -> Vec<MenuItem>;
    fn table_row(&self, state: &EditorState, index: usize, dictionary: &Dictionary)
    -> Vec<MenuItem>;
    fn table_cell(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem>;
    fn image(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem>;
    fn attachment(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem>;
    fn divider(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem>;
}

/// The stock action sets of the plate editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMenus;

fn selected_attr<'a>(state: &'a EditorState, key: &str) -> Option<&'a str> {
    state.selected_node().and_then(|node| node.attr_str(key))
}

impl MenuProducers for DefaultMenus {
    fn formatting(
        &self,
        state: &EditorState,
        is_template: bool,
        is_mobile: bool,
        dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        let is_empty = state.is_empty();
        let in_code = state.is_mark_active(|marks| marks.code);
        let in_list = ["bullet_list", "ordered_list", "checkbox_list"]
            .iter()
            .any(|kind| state.ancestor(kind).is_some());
        let show_marks = !is_mobile || !is_empty;
        let heading_level = state
            .ancestor("heading")
            .and_then(|el| el.attrs.get("level"))
            .and_then(|level| level.as_u64());

        vec![
            Action::new("placeholder")
                .tooltip(&dictionary.placeholder)
                .icon("input")
                .active(state.is_mark_active(|marks| marks.placeholder))
                .visible(is_template && show_marks)
                .into(),
            MenuItem::separator(),
            Action::new("strong")
                .tooltip(&dictionary.strong)
                .icon("bold")
                .shortcut("Mod-b")
                .active(state.is_mark_active(|marks| marks.bold))
                .visible(!in_code && show_marks)
                .into(),
            Action::new("em")
                .tooltip(&dictionary.em)
                .icon("italic")
                .shortcut("Mod-i")
                .active(state.is_mark_active(|marks| marks.italic))
                .visible(!in_code && show_marks)
                .into(),
            Action::new("strikethrough")
                .tooltip(&dictionary.strikethrough)
                .icon("strikethrough")
                .shortcut("Mod-d")
                .active(state.is_mark_active(|marks| marks.strikethrough))
                .visible(!in_code && show_marks)
                .into(),
            Action::new("highlight")
                .tooltip(&dictionary.highlight)
                .icon("highlighter")
                .shortcut("Mod-Ctrl-h")
                .active(state.is_mark_active(|marks| marks.highlight))
                .visible(!in_code && show_marks)
                .into(),
            Action::new("code_inline")
                .tooltip(&dictionary.code_inline)
                .icon("code")
                .shortcut("Mod-e")
                .active(in_code)
                .visible(show_marks)
                .into(),
            MenuItem::separator(),
            Action::new("heading")
                .tooltip(&dictionary.heading)
                .icon("heading")
                .active(heading_level == Some(1))
                .attr("level", 1)
                .visible(!in_code && !is_mobile)
                .into(),
            Action::new("heading")
                .tooltip(&dictionary.subheading)
                .icon("heading-2")
                .active(heading_level == Some(2))
                .attr("level", 2)
                .visible(!in_code && !is_mobile)
                .into(),
            Action::new("blockquote")
                .tooltip(&dictionary.quote)
                .icon("quote")
                .active(state.ancestor("blockquote").is_some())
                .visible(!in_code && !is_mobile)
                .into(),
            MenuItem::separator(),
            Action::new("checkbox_list")
                .tooltip(&dictionary.checkbox_list)
                .icon("list-todo")
                .active(state.ancestor("checkbox_list").is_some())
                .visible(!in_code && (!is_mobile || !in_list))
                .into(),
            Action::new("bullet_list")
                .tooltip(&dictionary.bullet_list)
                .icon("list")
                .active(state.ancestor("bullet_list").is_some())
                .visible(!in_code && (!is_mobile || !in_list))
                .into(),
            Action::new("ordered_list")
                .tooltip(&dictionary.ordered_list)
                .icon("list-ordered")
                .active(state.ancestor("ordered_list").is_some())
                .visible(!in_code && (!is_mobile || !in_list))
                .into(),
            Action::new("outdent_list")
                .tooltip(&dictionary.outdent)
                .icon("indent-decrease")
                .visible(is_mobile && in_list)
                .into(),
            Action::new("indent_list")
                .tooltip(&dictionary.indent)
                .icon("indent-increase")
                .visible(is_mobile && in_list)
                .into(),
            MenuItem::separator(),
            Action::new("link")
                .tooltip(&dictionary.create_link)
                .icon("link")
                .shortcut("Mod-k")
                .active(state.is_mark_active(|marks| marks.link.is_some()))
                .visible(!in_code && show_marks)
                .into(),
            Action::new("comment")
                .tooltip(&dictionary.comment)
                .icon("message-square-text")
                .shortcut("Mod-Alt-m")
                .visible(!in_code && !is_empty)
                .into(),
        ]
    }

    fn code(&self, state: &EditorState, read_only: bool, dictionary: &Dictionary) -> Vec<MenuItem> {
        let language = state
            .ancestor("code_block")
            .or_else(|| state.ancestor("code_fence"))
            .and_then(|el| el.attrs.get("language"))
            .and_then(|language| language.as_str())
            .map_or_else(|| dictionary.code_language.clone(), str::to_string);

        vec![
            Action::new("copy_to_clipboard")
                .label(&dictionary.copy)
                .icon("copy")
                .into(),
            MenuItem::separator(),
            Action::new("code_block")
                .label(language)
                .icon("chevron-down")
                .visible(!read_only)
                .into(),
        ]
    }

    fn notice(
        &self,
        state: &EditorState,
        read_only: bool,
        dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        let style = state
            .ancestor("notice")
            .and_then(|el| el.attrs.get("style"))
            .and_then(|style| style.as_str())
            .unwrap_or("info");

        [
            ("info", &dictionary.info_notice, "info"),
            ("success", &dictionary.success_notice, "star"),
            ("warning", &dictionary.warning_notice, "triangle-alert"),
            ("tip", &dictionary.tip_notice, "lightbulb"),
        ]
        .into_iter()
        .map(|(value, tooltip, icon)| {
            MenuItem::from(
                Action::new("notice")
                    .tooltip(tooltip)
                    .icon(icon)
                    .attr("style", value)
                    .active(style == value)
                    .visible(!read_only),
            )
        })
        .collect()
    }

    fn read_only(
        &self,
        state: &EditorState,
        can_update: bool,
        dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        vec![
            Action::new("comment")
                .tooltip(&dictionary.comment)
                .label(&dictionary.comment)
                .icon("message-square-text")
                .visible(!state.is_empty())
                .into(),
            MenuItem::separator(),
            Action::new("edit")
                .tooltip(&dictionary.edit)
                .icon("pen")
                .visible(can_update)
                .into(),
        ]
    }

    fn table(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem> {
        let full_width = state
            .ancestor("table")
            .and_then(|el| el.attrs.get("layout"))
            .and_then(|layout| layout.as_str())
            == Some("full-width");

        vec![
            Action::new("set_table_attr")
                .tooltip(&dictionary.full_width)
                .icon("align-full-width")
                .attr("layout", if full_width { "" } else { "full-width" })
                .active(full_width)
                .into(),
            MenuItem::separator(),
            Action::new("delete_table")
                .tooltip(&dictionary.delete_table)
                .icon("trash")
                .into(),
        ]
    }

    fn table_column(
        &self,
        _state: &EditorState,
        index: usize,
        rtl: bool,
        dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        let (insert_left, insert_right) = if rtl {
            ("add_column_after", "add_column_before")
        } else {
            ("add_column_before", "add_column_after")
        };

        vec![
            Action::new("set_column_attr")
                .tooltip(&dictionary.align_left)
                .icon("align-left")
                .attr("index", index)
                .attr("alignment", "left")
                .into(),
            Action::new("set_column_attr")
                .tooltip(&dictionary.align_center)
                .icon("align-center")
                .attr("index", index)
                .attr("alignment", "center")
                .into(),
            Action::new("set_column_attr")
                .tooltip(&dictionary.align_right)
                .icon("align-right")
                .attr("index", index)
                .attr("alignment", "right")
                .into(),
            MenuItem::separator(),
            Action::new("sort_table")
                .tooltip(&dictionary.sort_asc)
                .icon("arrow-down-a-z")
                .attr("index", index)
                .attr("direction", "asc")
                .into(),
            Action::new("sort_table")
                .tooltip(&dictionary.sort_desc)
                .icon("arrow-down-z-a")
                .attr("index", index)
                .attr("direction", "desc")
                .into(),
            MenuItem::separator(),
            Action::new(insert_left)
                .tooltip(&dictionary.add_column_before)
                .icon("between-horizontal-end")
                .attr("index", index)
                .into(),
            Action::new(insert_right)
                .tooltip(&dictionary.add_column_after)
                .icon("between-horizontal-start")
                .attr("index", index)
                .into(),
            MenuItem::separator(),
            Action::new("delete_column")
                .tooltip(&dictionary.delete_column)
                .icon("trash")
                .attr("index", index)
                .into(),
        ]
    }

    fn table_row(
        &self,
        _state: &EditorState,
        index: usize,
        dictionary: &Dictionary,
    ) -> Vec<MenuItem> {
        vec![
            // Nothing may be inserted above the header row.
            Action::new("add_row_before")
                .tooltip(&dictionary.add_row_before)
                .icon("between-vertical-end")
                .attr("index", index)
                .visible(index != 0)
                .into(),
            Action::new("add_row_after")
                .tooltip(&dictionary.add_row_after)
                .icon("between-vertical-start")
                .attr("index", index)
                .into(),
            MenuItem::separator(),
            Action::new("delete_row")
                .tooltip(&dictionary.delete_row)
                .icon("trash")
                .attr("index", index)
                .into(),
        ]
    }

    fn table_cell(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem> {
        let spans_many = state
            .cell_rect()
            .is_some_and(|rect| rect.bottom - rect.top > 1 || rect.right - rect.left > 1);

        vec![
            Action::new("merge_cells")
                .tooltip(&dictionary.merge_cells)
                .icon("table-cells-merge")
                .visible(spans_many)
                .into(),
            Action::new("split_cell")
                .tooltip(&dictionary.split_cell)
                .icon("table-cells-split")
                .visible(!spans_many)
                .into(),
        ]
    }

    fn image(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem> {
        let layout = selected_attr(state, "layout");
        let has_size = state
            .selected_node()
            .and_then(Node::attrs)
            .is_some_and(|attrs| attrs.get("width").is_some_and(|width| !width.is_null()));

        vec![
            Action::new("align_left")
                .tooltip(&dictionary.align_image_left)
                .icon("align-left")
                .active(layout == Some("left-50"))
                .into(),
            Action::new("align_center")
                .tooltip(&dictionary.align_image_center)
                .icon("align-center")
                .active(layout.is_none())
                .into(),
            Action::new("align_right")
                .tooltip(&dictionary.align_image_right)
                .icon("align-right")
                .active(layout == Some("right-50"))
                .into(),
            Action::new("align_full_width")
                .tooltip(&dictionary.align_full_width)
                .icon("align-full-width")
                .active(layout == Some("full-width"))
                .into(),
            MenuItem::separator(),
            Action::new("dimensions")
                .tooltip(&dictionary.dimensions)
                .visible(has_size)
                .into(),
            MenuItem::separator(),
            Action::new("download_image")
                .tooltip(&dictionary.download)
                .icon("download")
                .into(),
            Action::new("replace_image")
                .tooltip(&dictionary.replace)
                .icon("replace")
                .into(),
            Action::new("delete_image")
                .tooltip(&dictionary.delete_image)
                .icon("trash")
                .into(),
        ]
    }

    fn attachment(&self, _state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem> {
        vec![
            Action::new("download_attachment")
                .tooltip(&dictionary.download)
                .icon("download")
                .into(),
            Action::new("replace_attachment")
                .tooltip(&dictionary.replace)
                .icon("replace")
                .into(),
            MenuItem::separator(),
            Action::new("delete_attachment")
                .tooltip(&dictionary.delete_attachment)
                .icon("trash")
                .into(),
        ]
    }

    fn divider(&self, state: &EditorState, dictionary: &Dictionary) -> Vec<MenuItem> {
        let markup = selected_attr(state, "markup");

        vec![
            Action::new("hr")
                .tooltip(&dictionary.page_break)
                .icon("page-break")
                .attr("markup", "***")
                .active(markup == Some("***"))
                .into(),
            Action::new("hr")
                .tooltip(&dictionary.hr)
                .icon("minus")
                .attr("markup", "---")
                .active(markup != Some("***"))
                .into(),
        ]
    }
}
