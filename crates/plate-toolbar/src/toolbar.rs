use std::cell::{Ref, RefCell, RefMut};
use std::ops::Range;
use std::rc::Rc;

use kurbo::Rect;
use serde::Serialize;
use tracing::{debug, info};

use crate::capabilities::Capabilities;
use crate::classify::{Classification, InlineEditor, ToolbarContext, classify};
use crate::dictionary::Dictionary;
use crate::dismiss::OutsideDismissal;
use crate::document::DocumentError;
use crate::drag::DragGate;
use crate::events::{Subscription, WindowEvent, WindowEventKind, WindowEvents};
use crate::filter::filter_items;
use crate::menu::MenuItem;
use crate::menus::{DefaultMenus, MenuProducers};
use crate::options::ToolbarOptions;
use crate::queries::MarkRange;
use crate::resolve::resolve_items;
use crate::selection::EditorState;
use crate::visibility::{VisibilityMachine, VisibilityTransition};

/// Width of the toolbar while it hosts the link or embed editor.
pub const EDITOR_WIDTH: f64 = 336.0;

/// Callbacks the toolbar raises on the host.
pub trait ToolbarHost {
    fn on_open(&mut self);
    fn on_close(&mut self);
    /// The user followed a link from the link editor.
    fn on_click_link(&mut self, _href: &str) {}
}

impl ToolbarHost for () {
    fn on_open(&mut self) {}
    fn on_close(&mut self) {}
}

/// What the floating toolbar should draw.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "render", rename_all = "snake_case")]
pub enum ToolbarRender {
    #[default]
    Hidden,
    Menu {
        context: ToolbarContext,
        items: Vec<MenuItem>,
    },
    LinkEditor {
        range: MarkRange,
    },
    EmbedLinkEditor {
        pos: usize,
        href: Option<String>,
    },
}

impl ToolbarRender {
    pub fn is_hidden(&self) -> bool {
        matches!(self, ToolbarRender::Hidden)
    }

    /// Fixed width for editor views; menus size to their content.
    pub fn width(&self) -> Option<f64> {
        match self {
            ToolbarRender::LinkEditor { .. } | ToolbarRender::EmbedLinkEditor { .. } => {
                Some(EDITOR_WIDTH)
            }
            ToolbarRender::Hidden | ToolbarRender::Menu { .. } => None,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        match self {
            ToolbarRender::Menu { items, .. } => items,
            ToolbarRender::Hidden
            | ToolbarRender::LinkEditor { .. }
            | ToolbarRender::EmbedLinkEditor { .. } => &[],
        }
    }
}

/// Drives classification, resolution and filtering for one editor and
/// raises open/close callbacks on the host.
pub struct SelectionToolbar<P = DefaultMenus, H = ()> {
    producers: P,
    host: H,
    options: ToolbarOptions,
    dictionary: Dictionary,
    visibility: VisibilityMachine,
    drag: DragGate,
    dismissal: OutsideDismissal,
    active: bool,
    classification: Option<Classification>,
    render: ToolbarRender,
}

impl<H: ToolbarHost> SelectionToolbar<DefaultMenus, H> {
    pub fn new(options: ToolbarOptions, host: H) -> Self {
        Self::with_producers(DefaultMenus, options, host)
    }
}

impl<P: MenuProducers, H: ToolbarHost> SelectionToolbar<P, H> {
    pub fn with_producers(producers: P, options: ToolbarOptions, host: H) -> Self {
        Self {
            producers,
            host,
            options,
            dictionary: Dictionary::default(),
            visibility: VisibilityMachine::new(),
            drag: DragGate::new(),
            dismissal: OutsideDismissal::new(),
            active: false,
            classification: None,
            render: ToolbarRender::Hidden,
        }
    }

    pub fn dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    pub fn options(&self) -> &ToolbarOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ToolbarOptions) {
        self.options = options;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn render(&self) -> &ToolbarRender {
        &self.render
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Classifier output combined with the mobile override, before drag
    /// suppression.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn set_toolbar_bounds(&mut self, bounds: Option<Rect>) {
        self.dismissal.set_toolbar_bounds(bounds);
    }

    pub fn set_editor_bounds(&mut self, bounds: Option<Rect>) {
        self.dismissal.set_editor_bounds(bounds);
    }

    /// Runs one evaluation cycle over the current state.
    pub fn evaluate(&mut self, state: &EditorState, capabilities: &dyn Capabilities) -> &ToolbarRender {
        let classification = classify(state, self.options.read_only);
        self.active = classification.active || self.options.mobile;

        match self.visibility.update(self.drag.gate(self.active)) {
            Some(VisibilityTransition::Opened) => self.host.on_open(),
            Some(VisibilityTransition::Closed) => self.host.on_close(),
            None => {}
        }

        self.render = self.build_render(state, &classification, capabilities);
        self.classification = Some(classification);
        &self.render
    }

    fn build_render(
        &self,
        state: &EditorState,
        classification: &Classification,
        capabilities: &dyn Capabilities,
    ) -> ToolbarRender {
        if !self.visibility.is_open() || self.options.suppresses_toolbar() {
            return ToolbarRender::Hidden;
        }

        let items = resolve_items(
            classification.context,
            state,
            &self.options,
            &self.producers,
            &self.dictionary,
        );
        let items = filter_items(items, capabilities);
        if items.is_empty() {
            debug!(context = ?classification.context, "no toolbar items left");
            return ToolbarRender::Hidden;
        }

        match &classification.editor {
            Some(InlineEditor::TextLink(range)) => ToolbarRender::LinkEditor {
                range: range.clone(),
            },
            Some(InlineEditor::EmbedLink { pos, href }) => ToolbarRender::EmbedLinkEditor {
                pos: *pos,
                href: href.clone(),
            },
            None => ToolbarRender::Menu {
                context: classification.context,
                items,
            },
        }
    }

    /// Folds a window event into the toolbar. Any selection change it causes
    /// is re-evaluated before returning. Returns whether an evaluation ran.
    pub fn handle_event(
        &mut self,
        event: &WindowEvent,
        state: &mut EditorState,
        capabilities: &dyn Capabilities,
    ) -> bool {
        match event {
            WindowEvent::DragStart | WindowEvent::DragEnd | WindowEvent::Drop => {
                if !self.drag.handle(event) {
                    return false;
                }
            }
            WindowEvent::PointerUp(pointer) => {
                if !self.dismissal.handle(pointer, self.active, state) {
                    return false;
                }
            }
        }
        self.evaluate(state, capabilities);
        true
    }

    /// Commits a link edit: any link over `range` is replaced by one to
    /// `href`.
    pub fn select_link(
        &mut self,
        state: &mut EditorState,
        range: Range<usize>,
        href: &str,
        capabilities: &dyn Capabilities,
    ) -> Result<(), DocumentError> {
        state.set_link(range.clone(), href)?;
        info!(from = range.start, to = range.end, href, "link updated");
        self.evaluate(state, capabilities);
        Ok(())
    }

    pub fn click_link(&mut self, href: &str) {
        self.host.on_click_link(href);
    }
}

impl<P, H> SelectionToolbar<P, H>
where
    P: MenuProducers + 'static,
    H: ToolbarHost + 'static,
{
    /// Registers the toolbar's window listeners and runs a first evaluation.
    /// The listeners live until the returned handle is dropped.
    ///
    /// Host callbacks may emit on `events`; such events are handled after
    /// the one being dispatched. Evaluating the toolbar from inside a
    /// callback is not supported.
    pub fn mount(
        self,
        events: &WindowEvents,
        state: Rc<RefCell<EditorState>>,
        capabilities: Rc<dyn Capabilities>,
    ) -> MountedToolbar<P, H> {
        let toolbar = Rc::new(RefCell::new(self));

        let subscriptions = [
            WindowEventKind::PointerUp,
            WindowEventKind::DragStart,
            WindowEventKind::DragEnd,
            WindowEventKind::Drop,
        ]
        .into_iter()
        .map(|kind| {
            let toolbar = toolbar.clone();
            let state = state.clone();
            let capabilities = capabilities.clone();
            events.listen(kind, move |event| {
                toolbar
                    .borrow_mut()
                    .handle_event(event, &mut state.borrow_mut(), &*capabilities);
            })
        })
        .collect();

        toolbar
            .borrow_mut()
            .evaluate(&state.borrow(), &*capabilities);

        MountedToolbar {
            toolbar,
            state,
            capabilities,
            _subscriptions: subscriptions,
        }
    }
}

/// A toolbar attached to a window's events.
pub struct MountedToolbar<P, H> {
    toolbar: Rc<RefCell<SelectionToolbar<P, H>>>,
    state: Rc<RefCell<EditorState>>,
    capabilities: Rc<dyn Capabilities>,
    _subscriptions: Vec<Subscription>,
}

impl<P: MenuProducers, H: ToolbarHost> MountedToolbar<P, H> {
    pub fn toolbar(&self) -> Ref<'_, SelectionToolbar<P, H>> {
        self.toolbar.borrow()
    }

    pub fn toolbar_mut(&self) -> RefMut<'_, SelectionToolbar<P, H>> {
        self.toolbar.borrow_mut()
    }

    pub fn state(&self) -> Ref<'_, EditorState> {
        self.state.borrow()
    }

    /// Re-evaluates after the host changed the document, selection or
    /// capabilities.
    pub fn refresh(&self) {
        self.toolbar
            .borrow_mut()
            .evaluate(&self.state.borrow(), &*self.capabilities);
    }
}
