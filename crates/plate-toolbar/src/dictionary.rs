use serde::{Deserialize, Serialize};

/// Localized labels for toolbar actions. Keys missing from a translation
/// fall back to English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dictionary {
    pub placeholder: String,
    pub strong: String,
    pub em: String,
    pub strikethrough: String,
    pub highlight: String,
    pub code_inline: String,
    pub heading: String,
    pub subheading: String,
    pub quote: String,
    pub checkbox_list: String,
    pub bullet_list: String,
    pub ordered_list: String,
    pub outdent: String,
    pub indent: String,
    pub create_link: String,
    pub comment: String,
    pub copy: String,
    pub code_language: String,
    pub info_notice: String,
    pub success_notice: String,
    pub warning_notice: String,
    pub tip_notice: String,
    pub edit: String,
    pub full_width: String,
    pub delete_table: String,
    pub align_left: String,
    pub align_center: String,
    pub align_right: String,
    pub sort_asc: String,
    pub sort_desc: String,
    pub add_column_before: String,
    pub add_column_after: String,
    pub delete_column: String,
    pub add_row_before: String,
    pub add_row_after: String,
    pub delete_row: String,
    pub merge_cells: String,
    pub split_cell: String,
    pub align_image_left: String,
    pub align_image_center: String,
    pub align_image_right: String,
    pub align_full_width: String,
    pub dimensions: String,
    pub download: String,
    pub replace: String,
    pub delete_image: String,
    pub delete_attachment: String,
    pub page_break: String,
    pub hr: String,
}

impl Default for Dictionary {
    fn default() -> Self {
        let s = str::to_string;
        Self {
            placeholder: s("Placeholder"),
            strong: s("Bold"),
            em: s("Italic"),
            strikethrough: s("Strikethrough"),
            highlight: s("Highlight"),
            code_inline: s("Code"),
            heading: s("Heading"),
            subheading: s("Subheading"),
            quote: s("Quote"),
            checkbox_list: s("Todo list"),
            bullet_list: s("Bulleted list"),
            ordered_list: s("Ordered list"),
            outdent: s("Outdent"),
            indent: s("Indent"),
            create_link: s("Create link"),
            comment: s("Comment"),
            copy: s("Copy"),
            code_language: s("Plain text"),
            info_notice: s("Info notice"),
            success_notice: s("Success notice"),
            warning_notice: s("Warning notice"),
            tip_notice: s("Tip notice"),
            edit: s("Edit"),
            full_width: s("Full width"),
            delete_table: s("Delete table"),
            align_left: s("Align left"),
            align_center: s("Align center"),
            align_right: s("Align right"),
            sort_asc: s("Sort ascending"),
            sort_desc: s("Sort descending"),
            add_column_before: s("Insert column before"),
            add_column_after: s("Insert column after"),
            delete_column: s("Delete column"),
            add_row_before: s("Insert row before"),
            add_row_after: s("Insert row after"),
            delete_row: s("Delete row"),
            merge_cells: s("Merge cells"),
            split_cell: s("Split cell"),
            align_image_left: s("Float left"),
            align_image_center: s("Center"),
            align_image_right: s("Float right"),
            align_full_width: s("Full width"),
            dimensions: s("Dimensions"),
            download: s("Download"),
            replace: s("Replace"),
            delete_image: s("Delete image"),
            delete_attachment: s("Delete"),
            page_break: s("Page break"),
            hr: s("Divider"),
        }
    }
}

impl Dictionary {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_translation_falls_back_to_english() {
        let dictionary = Dictionary::from_json(r#"{ "strong": "Fett" }"#).unwrap();
        assert_eq!(dictionary.strong, "Fett");
        assert_eq!(dictionary.em, "Italic");
    }
}
