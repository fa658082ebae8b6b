use super::*;
use crate::foundation::core::{Rect, Size};
use crate::overlay::host::SharedHostBox;

fn setup(dpr: f64) -> (Rc<SharedHostBox>, EventHub, FreehandOverlay) {
    let host = SharedHostBox::new(Point::new(100.0, 50.0), Size::new(40.0, 30.0), dpr);
    let hub = EventHub::new();
    let overlay = FreehandOverlay::attach(host.clone(), &hub, InkStyle::default());
    (host, hub, overlay)
}

fn scribble(hub: &EventHub) {
    hub.dispatch(&HostEvent::PointerDown(Point::new(105.0, 60.0)));
    hub.dispatch(&HostEvent::PointerMove(Point::new(120.0, 60.0)));
    hub.dispatch(&HostEvent::PointerMove(Point::new(130.0, 70.0)));
    hub.dispatch(&HostEvent::PointerUp(Point::new(130.0, 70.0)));
}

fn alpha_at(overlay: &FreehandOverlay, x: u32, y: u32) -> u8 {
    overlay.frame().unwrap().pixel(x, y).unwrap()[3]
}

#[test]
fn surface_tracks_box_and_density() {
    let (host, hub, overlay) = setup(2.0);
    assert_eq!(overlay.surface_size(), Some(PixelSize::new(80, 60).unwrap()));

    host.set_rect(Rect::new(0.0, 0.0, 50.0, 25.0));
    hub.dispatch(&HostEvent::HostResized);
    assert_eq!(overlay.surface_size(), Some(PixelSize::new(100, 50).unwrap()));

    host.set_device_pixel_ratio(1.0);
    hub.dispatch(&HostEvent::WindowResized);
    assert_eq!(overlay.surface_size(), Some(PixelSize::new(50, 25).unwrap()));
}

#[test]
fn drawing_is_noop_while_disabled() {
    let (_host, hub, overlay) = setup(1.0);
    scribble(&hub);
    assert_eq!(overlay.ink_path_count(), 0);
    assert_eq!(alpha_at(&overlay, 12, 10), 0);
}

#[test]
fn press_move_release_draws_straight_segments() {
    let (_host, hub, overlay) = setup(1.0);
    overlay.set_enabled(true);
    scribble(&hub);
    assert_eq!(overlay.ink_path_count(), 1);
    // Box-local (5,10) -> (20,10): midpoint is inked, far corner is not.
    assert!(alpha_at(&overlay, 12, 10) > 0);
    assert_eq!(alpha_at(&overlay, 2, 28), 0);

    // Moves after release draw nothing.
    hub.dispatch(&HostEvent::PointerMove(Point::new(101.0, 78.0)));
    assert_eq!(alpha_at(&overlay, 1, 28), 0);
}

#[test]
fn ink_survives_density_change() {
    let (host, hub, overlay) = setup(1.0);
    overlay.set_enabled(true);
    scribble(&hub);

    host.set_device_pixel_ratio(2.0);
    hub.dispatch(&HostEvent::WindowResized);
    assert_eq!(overlay.surface_size(), Some(PixelSize::new(80, 60).unwrap()));
    assert!(alpha_at(&overlay, 24, 20) > 0);
}

#[test]
fn clear_wipes_ink_only() {
    use crate::strokes::document::SvgDocument;

    let doc = SvgDocument::from_markup(r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0 L1,1"/></svg>"#);
    let before = doc.markup().to_owned();
    let (_host, hub, overlay) = setup(1.0);
    overlay.set_enabled(true);
    scribble(&hub);

    overlay.clear();
    assert_eq!(overlay.ink_path_count(), 0);
    let frame = overlay.frame().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
    assert_eq!(doc.markup(), before);
}

#[test]
fn dispose_releases_every_listener() {
    let (_host, hub, mut overlay) = setup(1.0);
    assert_eq!(hub.listener_count(), 3);
    overlay.dispose();
    assert_eq!(hub.listener_count(), 0);
    assert!(!overlay.is_attached());
    assert!(overlay.frame().is_none());
    overlay.dispose();

    let (_host, hub, overlay) = setup(1.0);
    drop(overlay);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn snapshot_is_straight_alpha() {
    let (_host, hub, overlay) = setup(1.0);
    overlay.set_enabled(true);
    scribble(&hub);
    let img = overlay.snapshot().unwrap();
    assert_eq!(img.dimensions(), (40, 30));
    let px = img.get_pixel(12, 10).0;
    assert_eq!(px[3], 255);
    assert_eq!(&px[..3], &[0x22, 0x22, 0x22]);
}
