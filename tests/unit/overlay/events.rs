use std::cell::Cell;

use super::*;

#[test]
fn dispatch_reaches_only_matching_channel() {
    let hub = EventHub::new();
    let resizes = Rc::new(Cell::new(0));
    let pointers = Rc::new(Cell::new(0));

    let r = Rc::clone(&resizes);
    hub.subscribe(EventChannel::HostResize, move |_| r.set(r.get() + 1));
    let p = Rc::clone(&pointers);
    hub.subscribe(EventChannel::Pointer, move |_| p.set(p.get() + 1));

    hub.dispatch(&HostEvent::HostResized);
    hub.dispatch(&HostEvent::PointerDown(Point::new(1.0, 2.0)));
    hub.dispatch(&HostEvent::PointerCancel);
    hub.dispatch(&HostEvent::WindowResized);

    assert_eq!(resizes.get(), 1);
    assert_eq!(pointers.get(), 2);
}

#[test]
fn unsubscribe_removes_listener() {
    let hub = EventHub::new();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let id = hub.subscribe(EventChannel::WindowResize, move |_| h.set(h.get() + 1));
    assert_eq!(hub.listener_count(), 1);
    assert_eq!(hub.channel_listener_count(EventChannel::WindowResize), 1);

    assert!(hub.unsubscribe(id));
    assert!(!hub.unsubscribe(id));
    hub.dispatch(&HostEvent::WindowResized);
    assert_eq!(hits.get(), 0);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn listener_may_unsubscribe_itself() {
    let hub = EventHub::new();
    let slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
    let hub2 = hub.clone();
    let slot2 = Rc::clone(&slot);
    let id = hub.subscribe(EventChannel::HostResize, move |_| {
        if let Some(id) = slot2.get() {
            hub2.unsubscribe(id);
        }
    });
    slot.set(Some(id));
    hub.dispatch(&HostEvent::HostResized);
    assert_eq!(hub.listener_count(), 0);
}
