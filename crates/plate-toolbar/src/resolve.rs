use tracing::debug;

use crate::classify::ToolbarContext;
use crate::dictionary::Dictionary;
use crate::menu::MenuItem;
use crate::menus::MenuProducers;
use crate::options::ToolbarOptions;
use crate::selection::EditorState;

/// Asks the producer for `context` for its raw action list.
///
/// Media contexts in read-only mode yield nothing without consulting the
/// producer.
pub fn resolve_items<P>(
    context: ToolbarContext,
    state: &EditorState,
    options: &ToolbarOptions,
    producers: &P,
    dictionary: &Dictionary,
) -> Vec<MenuItem>
where
    P: MenuProducers + ?Sized,
{
    let read_only = options.read_only;
    let items = match context {
        ToolbarContext::Code => producers.code(state, read_only, dictionary),
        ToolbarContext::Table => producers.table(state, dictionary),
        ToolbarContext::TableColumn { index } => {
            producers.table_column(state, index, options.rtl, dictionary)
        }
        ToolbarContext::TableRow { index } => producers.table_row(state, index, dictionary),
        ToolbarContext::TableCell => producers.table_cell(state, dictionary),
        ToolbarContext::Image if read_only => Vec::new(),
        ToolbarContext::Image => producers.image(state, dictionary),
        ToolbarContext::Attachment if read_only => Vec::new(),
        ToolbarContext::Attachment => producers.attachment(state, dictionary),
        ToolbarContext::Divider => producers.divider(state, dictionary),
        ToolbarContext::ReadOnly => producers.read_only(state, options.can_update, dictionary),
        ToolbarContext::Notice => producers.notice(state, read_only, dictionary),
        ToolbarContext::Formatting => {
            producers.formatting(state, options.is_template, options.mobile, dictionary)
        }
    };
    debug!(?context, count = items.len(), "resolved toolbar items");
    items
}
