use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use kurbo::Point;

/// Pointer released anywhere in the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerUp {
    pub position: Point,
    /// Keyboard focus is inside a text input, e.g. the link editor field.
    pub focus_in_input: bool,
    /// The platform's native text selection is collapsed.
    pub native_selection_collapsed: bool,
}

impl PointerUp {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            focus_in_input: false,
            native_selection_collapsed: true,
        }
    }
}

/// Window-level events the toolbar listens to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    PointerUp(PointerUp),
    DragStart,
    DragEnd,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    PointerUp,
    DragStart,
    DragEnd,
    Drop,
}

impl WindowEvent {
    pub fn kind(&self) -> WindowEventKind {
        match self {
            WindowEvent::PointerUp(_) => WindowEventKind::PointerUp,
            WindowEvent::DragStart => WindowEventKind::DragStart,
            WindowEvent::DragEnd => WindowEventKind::DragEnd,
            WindowEvent::Drop => WindowEventKind::Drop,
        }
    }
}

type Listener = Rc<RefCell<dyn FnMut(&WindowEvent)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, WindowEventKind, Listener)>,
    dispatching: bool,
    /// Events emitted by listeners, delivered once the current one is done.
    pending: VecDeque<WindowEvent>,
}

/// Single-threaded source of window events.
///
/// Listeners stay registered for as long as the [`Subscription`] returned
/// by [`WindowEvents::listen`] is alive.
#[derive(Clone, Default)]
pub struct WindowEvents {
    listeners: Rc<RefCell<Listeners>>,
}

impl WindowEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(
        &self,
        kind: WindowEventKind,
        listener: impl FnMut(&WindowEvent) + 'static,
    ) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        listeners.entries.push((id, kind, listener));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Delivers `event` to every listener registered for its kind, in
    /// registration order. Events emitted from inside a listener are queued
    /// and delivered after the current event, in emission order.
    pub fn emit(&self, event: &WindowEvent) {
        {
            let mut listeners = self.listeners.borrow_mut();
            if listeners.dispatching {
                listeners.pending.push_back(*event);
                return;
            }
            listeners.dispatching = true;
        }

        let mut next = Some(*event);
        while let Some(event) = next {
            self.dispatch(&event);
            next = self.listeners.borrow_mut().pending.pop_front();
        }
        self.listeners.borrow_mut().dispatching = false;
    }

    fn dispatch(&self, event: &WindowEvent) {
        let kind = event.kind();
        let matching: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, listener)| listener.clone())
            .collect();
        for listener in matching {
            let mut listener = listener.borrow_mut();
            (&mut *listener)(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Keeps a listener registered; dropping it unregisters the listener.
#[must_use]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let removed: Vec<_> = {
                let mut listeners = listeners.borrow_mut();
                let (removed, kept) = std::mem::take(&mut listeners.entries)
                    .into_iter()
                    .partition(|(id, _, _)| *id == self.id);
                listeners.entries = kept;
                removed
            };
            // Listener captures drop outside the borrow.
            drop(removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn dropping_subscription_unregisters_listener() {
        let events = WindowEvents::new();
        let hits = Rc::new(Cell::new(0));

        let subscription = {
            let hits = hits.clone();
            events.listen(WindowEventKind::DragStart, move |_| hits.set(hits.get() + 1))
        };
        events.emit(&WindowEvent::DragStart);
        events.emit(&WindowEvent::Drop);
        assert_eq!(hits.get(), 1);

        drop(subscription);
        events.emit(&WindowEvent::DragStart);
        assert_eq!(hits.get(), 1);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn events_emitted_by_listeners_are_queued() {
        let events = WindowEvents::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _start = {
            let emitter = events.clone();
            let seen = seen.clone();
            events.listen(WindowEventKind::DragStart, move |event| {
                seen.borrow_mut().push(event.kind());
                emitter.emit(&WindowEvent::Drop);
                emitter.emit(&WindowEvent::DragEnd);
                seen.borrow_mut().push(WindowEventKind::DragStart);
            })
        };
        let _rest = [WindowEventKind::Drop, WindowEventKind::DragEnd].map(|kind| {
            let seen = seen.clone();
            events.listen(kind, move |event| seen.borrow_mut().push(event.kind()))
        });

        events.emit(&WindowEvent::DragStart);
        assert_eq!(
            *seen.borrow(),
            [
                WindowEventKind::DragStart,
                WindowEventKind::DragStart,
                WindowEventKind::Drop,
                WindowEventKind::DragEnd,
            ]
        );

        events.emit(&WindowEvent::Drop);
        assert_eq!(seen.borrow().len(), 5);
    }
}
