//! Integration tests: freehand stroke tracking (paint-editor).
//!
//! Drives the controller with pointer sequences against a recording
//! surface and checks which polylines end up on the canvas.

use paint_core::CanvasConfig;
use paint_editor::input::InputEvent;
use paint_editor::recording::RecordingSurface;
use paint_editor::{Controller, DrawingSurface, Point};
use pretty_assertions::assert_eq;

fn make_controller() -> Controller<RecordingSurface> {
    let mut controller = Controller::new(RecordingSurface::default(), CanvasConfig::default());
    controller.surface_mut().clear_ops();
    controller
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// ─── Single strokes ─────────────────────────────────────────────────────

#[test]
fn drag_renders_one_continuous_stroke() {
    let mut c = make_controller();
    c.pointer_move(pt(100.0, 100.0));
    c.pointer_down(pt(100.0, 100.0));
    c.pointer_move(pt(120.0, 110.0));
    c.pointer_move(pt(140.0, 130.0));
    c.pointer_move(pt(160.0, 125.0));
    c.pointer_up();

    let strokes = c.surface().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(
        strokes[0].points,
        vec![
            pt(100.0, 100.0),
            pt(120.0, 110.0),
            pt(140.0, 130.0),
            pt(160.0, 125.0)
        ]
    );
}

#[test]
fn moves_before_press_render_nothing() {
    let mut c = make_controller();
    for i in 0..10 {
        c.pointer_move(pt(i as f64 * 10.0, 50.0));
    }
    assert!(c.surface().ops().is_empty());
    assert!(c.surface().strokes().is_empty());
}

#[test]
fn first_segment_starts_at_press_point() {
    let mut c = make_controller();
    // Pointer wanders, then presses somewhere else without an intervening move
    c.pointer_move(pt(5.0, 5.0));
    c.pointer_down(pt(300.0, 300.0));
    c.pointer_move(pt(310.0, 300.0));
    c.pointer_up();

    let strokes = c.surface().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].points[0], pt(300.0, 300.0));
}

#[test]
fn width_ten_horizontal_stroke() {
    let mut c = make_controller();
    c.set_line_width(10.0);
    c.pointer_move(pt(100.0, 100.0));
    c.pointer_down(pt(100.0, 100.0));
    c.pointer_move(pt(200.0, 100.0));
    c.pointer_up();

    let strokes = c.surface().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].points, vec![pt(100.0, 100.0), pt(200.0, 100.0)]);
    assert_eq!(strokes[0].width, 10.0);
}

// ─── Path reset ─────────────────────────────────────────────────────────

#[test]
fn move_after_release_renders_nothing() {
    let mut c = make_controller();
    c.pointer_down(pt(10.0, 10.0));
    c.pointer_move(pt(20.0, 20.0));
    c.pointer_up();
    let before = c.surface().ops().len();

    c.pointer_move(pt(200.0, 200.0));
    c.pointer_move(pt(300.0, 300.0));
    assert_eq!(c.surface().ops().len(), before);
}

#[test]
fn move_after_leave_renders_nothing() {
    let mut c = make_controller();
    c.pointer_down(pt(10.0, 10.0));
    c.pointer_move(pt(20.0, 20.0));
    c.pointer_leave();
    let before = c.surface().ops().len();

    c.pointer_move(pt(200.0, 200.0));
    assert_eq!(c.surface().ops().len(), before);
    assert!(!c.state().painting);
}

#[test]
fn consecutive_strokes_do_not_connect() {
    let mut c = make_controller();
    c.pointer_down(pt(0.0, 0.0));
    c.pointer_move(pt(50.0, 0.0));
    c.pointer_up();

    c.pointer_move(pt(0.0, 100.0));
    c.pointer_down(pt(0.0, 100.0));
    c.pointer_move(pt(50.0, 100.0));
    c.pointer_up();

    let strokes = c.surface().strokes();
    assert_eq!(strokes.len(), 2);
    assert_eq!(strokes[0].points, vec![pt(0.0, 0.0), pt(50.0, 0.0)]);
    assert_eq!(strokes[1].points, vec![pt(0.0, 100.0), pt(50.0, 100.0)]);
}

#[test]
fn retracing_an_earlier_stroke_counts_as_a_new_stroke() {
    let mut c = make_controller();
    c.pointer_down(pt(0.0, 0.0));
    c.pointer_move(pt(50.0, 0.0));
    c.pointer_up();

    c.pointer_down(pt(0.0, 0.0));
    c.pointer_move(pt(50.0, 0.0));
    c.pointer_move(pt(100.0, 0.0));
    c.pointer_up();

    let strokes = c.surface().strokes();
    assert_eq!(strokes.len(), 2);
    assert_eq!(strokes[0].points, vec![pt(0.0, 0.0), pt(50.0, 0.0)]);
    assert_eq!(
        strokes[1].points,
        vec![pt(0.0, 0.0), pt(50.0, 0.0), pt(100.0, 0.0)]
    );
}

#[test]
fn stroke_keeps_width_and_color_until_changed() {
    let mut c = make_controller();
    c.set_line_width(4.0);
    c.set_custom_color("#e74c3c");

    for row in 0..3 {
        let y = 10.0 + row as f64 * 20.0;
        c.pointer_down(pt(0.0, y));
        c.pointer_move(pt(40.0, y));
        c.pointer_up();
    }

    let strokes = c.surface().strokes();
    assert_eq!(strokes.len(), 3);
    for stroke in strokes {
        assert_eq!(stroke.width, 4.0);
        assert_eq!(stroke.color, "#e74c3c");
    }
}

// ─── Event dispatch ─────────────────────────────────────────────────────

#[test]
fn dispatched_events_match_direct_calls() {
    let mut c = make_controller();
    let events = [
        InputEvent::from_pointer_move(10.0, 10.0),
        InputEvent::from_pointer_down(10.0, 10.0),
        InputEvent::from_pointer_move(30.0, 10.0),
        InputEvent::from_pointer_up(30.0, 10.0),
        InputEvent::from_pointer_move(90.0, 90.0),
    ];
    for event in &events {
        assert!(c.handle(event).is_none());
    }

    let strokes = c.surface().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].points, vec![pt(10.0, 10.0), pt(30.0, 10.0)]);
    assert_eq!(c.surface().line_width(), paint_core::DEFAULT_LINE_WIDTH);
}
