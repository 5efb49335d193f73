//! Decision engine for the floating selection toolbar of the plate editor.
//!
//! Every evaluation runs the same pipeline: [`classify`] the selection into a
//! [`ToolbarContext`], [`resolve_items`] through the injected
//! [`MenuProducers`], then [`filter_items`] against the host's
//! [`Capabilities`]. [`SelectionToolbar`] drives the pipeline, tracks open and
//! close edges, suppresses itself while a drag is in progress and collapses
//! the selection when the user clicks outside both the toolbar and the editor.

mod capabilities;
mod classify;
mod dictionary;
mod dismiss;
mod document;
mod drag;
mod events;
mod filter;
mod menu;
mod menus;
mod options;
mod queries;
mod resolve;
mod selection;
mod toolbar;
mod visibility;

pub use crate::capabilities::*;
pub use crate::classify::*;
pub use crate::dictionary::*;
pub use crate::dismiss::*;
pub use crate::document::*;
pub use crate::drag::*;
pub use crate::events::*;
pub use crate::filter::*;
pub use crate::menu::*;
pub use crate::menus::*;
pub use crate::options::*;
pub use crate::queries::*;
pub use crate::resolve::*;
pub use crate::selection::*;
pub use crate::toolbar::*;
pub use crate::visibility::*;
