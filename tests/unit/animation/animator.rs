use super::*;
use crate::animation::ease::Ease;
use crate::strokes::document::SvgDocument;
use crate::strokes::extract::extract_strokes;

#[derive(Debug, PartialEq)]
enum Call {
    Hide(usize),
    Flush,
    Reveal(usize, u64),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Recorder {
    fn reveals(&self) -> Vec<(usize, u64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Reveal(i, at) => Some((*i, *at)),
                _ => None,
            })
            .collect()
    }
}

impl StrokeHost for Recorder {
    fn hide(&mut self, stroke: &StrokePath) {
        self.calls.push(Call::Hide(stroke.index()));
    }

    fn flush_layout(&mut self) {
        self.calls.push(Call::Flush);
    }

    fn begin_reveal(&mut self, stroke: &StrokePath, transition: RevealTransition) {
        self.calls
            .push(Call::Reveal(stroke.index(), transition.start.as_millis() as u64));
    }
}

fn strokes(n: usize) -> Vec<StrokePath> {
    let mut markup = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg">"#);
    for i in 0..n {
        markup.push_str(&format!(r#"<path d="M0,{i} L10,{i}"/>"#));
    }
    markup.push_str("</svg>");
    extract_strokes(&SvgDocument::from_markup(&markup))
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

const TIMING: AnimationTiming = AnimationTiming {
    stroke_ms: 100,
    gap_ms: 50,
    ease: Ease::Linear,
};

#[test]
fn play_hides_flushes_then_reveals_first_stroke() {
    let mut host = Recorder::default();
    let mut anim = StrokeAnimator::new(strokes(3), TIMING);

    assert!(anim.play(ms(0), &mut host));
    assert_eq!(
        host.calls,
        [
            Call::Hide(0),
            Call::Hide(1),
            Call::Hide(2),
            Call::Flush,
            Call::Reveal(0, 0)
        ]
    );
    assert_eq!(anim.state(), AnimatorState::Animating);
    assert_eq!(anim.next_deadline(), Some(ms(150)));
}

#[test]
fn strokes_start_one_step_apart_then_idle() {
    let mut host = Recorder::default();
    let mut anim = StrokeAnimator::new(strokes(3), TIMING);
    anim.play(ms(10), &mut host);

    assert_eq!(anim.tick(ms(159), &mut host), AnimatorState::Animating);
    assert_eq!(host.reveals(), [(0, 10)]);

    anim.tick(ms(160), &mut host);
    anim.tick(ms(310), &mut host);
    assert_eq!(host.reveals(), [(0, 10), (1, 160), (2, 310)]);

    // The last stroke's interval still has to elapse.
    assert_eq!(anim.tick(ms(459), &mut host), AnimatorState::Animating);
    assert_eq!(anim.tick(ms(460), &mut host), AnimatorState::Idle);
    assert_eq!(anim.next_deadline(), None);
}

#[test]
fn late_tick_catches_up_on_schedule() {
    let mut host = Recorder::default();
    let mut anim = StrokeAnimator::new(strokes(4), TIMING);
    anim.play(ms(0), &mut host);
    anim.tick(ms(1000), &mut host);
    assert_eq!(host.reveals(), [(0, 0), (1, 150), (2, 300), (3, 450)]);
    assert_eq!(anim.state(), AnimatorState::Idle);
}

#[test]
fn second_play_while_animating_is_ignored() {
    let mut host = Recorder::default();
    let mut anim = StrokeAnimator::new(strokes(2), TIMING);
    assert!(anim.play(ms(0), &mut host));
    let calls_before = host.calls.len();

    assert!(!anim.play(ms(20), &mut host));
    assert_eq!(host.calls.len(), calls_before);

    anim.tick(ms(150), &mut host);
    assert_eq!(host.reveals(), [(0, 0), (1, 150)]);
}

#[test]
fn stop_waits_out_current_interval_then_halts() {
    let mut host = Recorder::default();
    let mut anim = StrokeAnimator::new(strokes(3), TIMING);
    anim.play(ms(0), &mut host);
    anim.tick(ms(150), &mut host);

    anim.stop();
    assert_eq!(anim.state(), AnimatorState::Idle);
    assert!(anim.is_draining());

    anim.tick(ms(299), &mut host);
    assert!(anim.is_draining());
    anim.tick(ms(300), &mut host);
    assert!(!anim.is_draining());
    anim.tick(ms(5000), &mut host);

    assert_eq!(host.reveals(), [(0, 0), (1, 150)]);
    assert_eq!(anim.state(), AnimatorState::Idle);
}

#[test]
fn play_after_stop_replaces_draining_run() {
    let mut host = Recorder::default();
    let mut anim = StrokeAnimator::new(strokes(2), TIMING);
    anim.play(ms(0), &mut host);
    anim.stop();

    assert!(anim.play(ms(40), &mut host));
    anim.tick(ms(150), &mut host);
    anim.tick(ms(190), &mut host);
    // Only the new run reveals stroke 1, on its own schedule.
    assert_eq!(host.reveals(), [(0, 0), (0, 40), (1, 190)]);
}

#[test]
fn empty_animator_never_starts() {
    let mut host = Recorder::default();
    let mut anim = StrokeAnimator::new(Vec::new(), TIMING);
    assert!(!anim.play(ms(0), &mut host));
    assert!(host.calls.is_empty());
    assert_eq!(anim.state(), AnimatorState::Idle);
    anim.stop();
    assert_eq!(anim.tick(ms(10), &mut host), AnimatorState::Idle);
}
