//! Framework-independent event registry.
//!
//! Stands in for the host environment's observers: a resize observer on the host box, a
//! window-level resize listener and pointer listeners. Whoever embeds the overlay forwards the
//! platform's events into [`EventHub::dispatch`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::Point;

/// Which observer a listener is registered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventChannel {
    /// Size changes of the host box itself.
    HostResize,
    /// Window-level size changes.
    WindowResize,
    /// Pointer input over the host box.
    Pointer,
}

/// An event forwarded from the host environment. Pointer positions are client coordinates in CSS
/// pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The host box changed size.
    HostResized,
    /// The window changed size.
    WindowResized,
    /// Pointer pressed.
    PointerDown(Point),
    /// Pointer moved.
    PointerMove(Point),
    /// Pointer released.
    PointerUp(Point),
    /// Pointer capture lost.
    PointerCancel,
}

impl HostEvent {
    /// The channel this event is delivered on.
    pub fn channel(&self) -> EventChannel {
        match self {
            Self::HostResized => EventChannel::HostResize,
            Self::WindowResized => EventChannel::WindowResize,
            Self::PointerDown(_) | Self::PointerMove(_) | Self::PointerUp(_) | Self::PointerCancel => {
                EventChannel::Pointer
            }
        }
    }
}

/// Registration handle returned by [`EventHub::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&HostEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, EventChannel, Listener)>,
}

/// Shared listener registry. Clones refer to the same registry.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventHub {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` on `channel`.
    pub fn subscribe(
        &self,
        channel: EventChannel,
        listener: impl Fn(&HostEvent) + 'static,
    ) -> ListenerId {
        let mut reg = self.inner.borrow_mut();
        reg.next_id += 1;
        let id = ListenerId(reg.next_id);
        reg.listeners.push((id, channel, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut reg = self.inner.borrow_mut();
        let before = reg.listeners.len();
        reg.listeners.retain(|(lid, _, _)| *lid != id);
        reg.listeners.len() != before
    }

    /// Deliver `event` to every listener on its channel, in registration order.
    ///
    /// Listeners may subscribe or unsubscribe while being called; changes apply to the next
    /// dispatch.
    pub fn dispatch(&self, event: &HostEvent) {
        let channel = event.channel();
        let targets: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, ch, _)| *ch == channel)
            .map(|(_, _, l)| Rc::clone(l))
            .collect();
        for listener in targets {
            listener(event);
        }
    }

    /// Number of registered listeners across all channels.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of listeners on one channel.
    pub fn channel_listener_count(&self, channel: EventChannel) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, ch, _)| *ch == channel)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/events.rs"]
mod tests;
