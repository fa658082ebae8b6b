use super::*;
use crate::assets::source::MemorySource;
use crate::animation::clock::ManualClock;
use crate::entry::model::SvgLocator;
use crate::foundation::core::{Point, Size};
use crate::overlay::events::HostEvent;
use crate::overlay::host::SharedHostBox;

const KANJIVG: &str = include_str!("../../fixtures/resources/kanji_svg/065e5.svg");

fn entry(chu: &str) -> Entry {
    Entry {
        chu: chu.to_owned(),
        han_viet: String::new(),
        nghia: String::new(),
        kun: vec![],
        on: vec![],
        bo: None,
        svg: SvgLocator::for_char(chu).unwrap(),
        updated_at: String::new(),
    }
}

fn viewer() -> StrokeViewer<MemorySource, Rc<ManualClock>> {
    let source = MemorySource::new()
        .with("resources/kanji_svg/065e5.svg", KANJIVG)
        .unwrap()
        .with("resources/kanji_svg/06708.svg", KANJIVG)
        .unwrap();
    StrokeViewer::new(
        AssetLoader::new(source),
        AnimationTiming::DIAGRAM,
        Rc::new(ManualClock::new()),
    )
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn load_reaches_ready_with_strokes() {
    let mut v = viewer();
    assert_eq!(v.state(), &ViewState::Empty);
    assert_eq!(v.load(entry("日")), &ViewState::Ready);
    assert_eq!(v.strokes().len(), 4);
    assert_eq!(v.entry().map(|e| e.chu.as_str()), Some("日"));
}

#[test]
fn missing_asset_is_an_in_place_failure() {
    let mut v = viewer();
    let state = v.load(entry("本")).clone();
    assert!(matches!(state, ViewState::Failed(msg) if msg.contains("404")));
    assert!(v.strokes().is_empty());
    assert!(!v.play());
}

#[test]
fn unresolvable_entry_fails_without_ticket() {
    let mut v = viewer();
    let mut e = entry("日");
    e.chu = String::new();
    e.svg = SvgLocator {
        codepoint_hex: String::new(),
        path: String::new(),
        exists: false,
    };
    assert!(v.show(e).is_none());
    assert!(matches!(v.state(), ViewState::Failed(_)));
}

#[test]
fn stale_load_is_discarded() {
    let mut v = viewer();
    let first = v.show(entry("日")).unwrap();
    let second = v.show(entry("月")).unwrap();

    let stale = v.fetch(&first);
    assert!(!v.finish_load(&first, stale));
    assert_eq!(v.state(), &ViewState::Loading);

    let fresh = v.fetch(&second);
    assert!(v.finish_load(&second, fresh));
    assert_eq!(v.state(), &ViewState::Ready);
    assert_eq!(v.entry().map(|e| e.chu.as_str()), Some("月"));
}

#[test]
fn play_animates_and_second_play_is_ignored() {
    let mut v = viewer();
    v.load(entry("日"));
    assert!(v.play());
    assert!(!v.play());
    assert_eq!(v.animator_state(), AnimatorState::Animating);
    assert_eq!(v.next_deadline(), Some(ms(1080)));

    let markup = v.render_markup().unwrap();
    assert!(markup.contains("stroke-dashoffset"));

    v.clock().set(ms(10_000));
    assert_eq!(v.tick(), AnimatorState::Idle);
    assert_eq!(v.next_deadline(), None);
}

#[test]
fn freehand_and_animation_exclude_each_other() {
    let mut v = viewer();
    let host = SharedHostBox::new(Point::ZERO, Size::new(109.0, 109.0), 1.0);
    let hub = EventHub::new();
    v.attach_overlay(host, &hub, InkStyle::default());
    v.load(entry("日"));

    assert!(v.play());
    v.set_freehand(true);
    assert!(v.is_freehand());
    assert_eq!(v.animator_state(), AnimatorState::Idle);

    assert!(v.play());
    assert!(!v.is_freehand());
    assert_eq!(v.animator_state(), AnimatorState::Animating);
}

#[test]
fn switching_character_clears_ink() {
    let mut v = viewer();
    let host = SharedHostBox::new(Point::ZERO, Size::new(109.0, 109.0), 1.0);
    let hub = EventHub::new();
    v.attach_overlay(host, &hub, InkStyle::default());
    v.load(entry("日"));
    v.set_freehand(true);

    hub.dispatch(&HostEvent::PointerDown(Point::new(10.0, 10.0)));
    hub.dispatch(&HostEvent::PointerMove(Point::new(50.0, 50.0)));
    hub.dispatch(&HostEvent::PointerUp(Point::new(50.0, 50.0)));
    assert_eq!(v.overlay().unwrap().ink_path_count(), 1);

    v.load(entry("月"));
    assert_eq!(v.overlay().unwrap().ink_path_count(), 0);
    assert_eq!(v.state(), &ViewState::Ready);

    v.detach_overlay();
    assert_eq!(hub.listener_count(), 0);
}
