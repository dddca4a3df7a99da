#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{ZOOM_MAX, ZOOM_MIN};
use crate::doc::ShapeKind;

// =============================================================
// Helpers
// =============================================================

/// DOM `buttons` bitmask with the primary button down.
const PRIMARY_HELD: u16 = 1;

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn ctrl_modifier() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn meta_modifier() -> Modifiers {
    Modifiers { meta: true, ..Default::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_shape_created(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::ShapeCreated(_)))
}

fn cursor_of(actions: &[Action]) -> Option<Cursor> {
    actions.iter().rev().find_map(|a| match a {
        Action::SetCursor(c) => Some(*c),
        _ => None,
    })
}

fn drag(core: &mut EngineCore, from: Point, to: Point) -> Vec<Action> {
    core.on_pointer_down(from, Button::Primary, no_modifiers());
    core.on_pointer_move(to, PRIMARY_HELD, no_modifiers());
    core.on_pointer_up(to, Button::Primary, no_modifiers())
}

// =============================================================
// EngineCore: construction and defaults
// =============================================================

#[test]
fn core_default_camera_is_identity() {
    let core = EngineCore::new();
    let cam = core.camera();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn core_default_tool_is_rectangle() {
    let core = EngineCore::new();
    assert_eq!(core.tool(), Tool::Rectangle);
}

#[test]
fn core_default_doc_is_empty_and_idle() {
    let core = EngineCore::new();
    assert!(core.doc.is_empty());
    assert!(core.input.is_idle());
    assert!(core.preview.is_none());
}

#[test]
fn core_default_viewport_is_zero() {
    let core = EngineCore::new();
    assert_eq!(core.viewport.width, 0.0);
    assert_eq!(core.viewport.height, 0.0);
    assert_eq!(core.viewport.dpr, 1.0);
}

#[test]
fn independent_cores_share_nothing() {
    let mut a = EngineCore::new();
    let b = EngineCore::new();
    a.set_tool(Tool::Line);
    drag(&mut a, pt(0.0, 0.0), pt(10.0, 10.0));
    assert_eq!(a.shapes().len(), 1);
    assert!(b.shapes().is_empty());
    assert_eq!(b.tool(), Tool::Rectangle);
}

#[test]
fn attach_sets_idle_cursor_and_renders() {
    let core = EngineCore::new();
    let actions = core.attach();
    assert_eq!(cursor_of(&actions), Some(Cursor::Crosshair));
    assert!(has_render_needed(&actions));
}

#[test]
fn attach_follows_current_tool() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Hand);
    assert_eq!(cursor_of(&core.attach()), Some(Cursor::Grab));
}

// =============================================================
// Tool
// =============================================================

#[test]
fn set_tool_updates_tool_and_cursor() {
    let mut core = EngineCore::new();
    let actions = core.set_tool(Tool::Hand);
    assert_eq!(core.tool(), Tool::Hand);
    assert_eq!(cursor_of(&actions), Some(Cursor::Grab));

    assert_eq!(cursor_of(&core.set_tool(Tool::Select)), Some(Cursor::Default));
    assert_eq!(cursor_of(&core.set_tool(Tool::Diamond)), Some(Cursor::Crosshair));
}

#[test]
fn set_tool_mid_gesture_keeps_cursor_and_gesture_tool() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Circle);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    let actions = core.set_tool(Tool::Line);
    assert!(cursor_of(&actions).is_none());

    core.on_pointer_up(pt(50.0, 40.0), Button::Primary, no_modifiers());
    assert_eq!(core.shapes()[0].kind, ShapeKind::Circle);
    assert_eq!(core.tool(), Tool::Line);
}

#[test]
fn set_tool_does_not_touch_existing_shapes() {
    let mut core = EngineCore::new();
    drag(&mut core, pt(0.0, 0.0), pt(20.0, 20.0));
    core.set_tool(Tool::Line);
    assert_eq!(core.shapes()[0].kind, ShapeKind::Rectangle);
}

// =============================================================
// Pointer down
// =============================================================

#[test]
fn hand_tool_starts_panning() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Hand);
    let actions = core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    assert_eq!(core.input, InputState::Panning { last_screen: pt(50.0, 50.0) });
    assert_eq!(cursor_of(&actions), Some(Cursor::Grabbing));
}

#[test]
fn middle_button_pans_regardless_of_tool() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Rectangle);
    core.on_pointer_down(pt(100.0, 100.0), Button::Middle, no_modifiers());
    assert!(matches!(core.input, InputState::Panning { .. }));
}

#[test]
fn shape_tool_starts_drawing_in_world_space() {
    let mut core = EngineCore::new();
    core.camera = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 2.0 };
    core.on_pointer_down(pt(120.0, 90.0), Button::Primary, no_modifiers());
    assert_eq!(
        core.input,
        InputState::Drawing { start_world: pt(50.0, 40.0), tool: Tool::Rectangle }
    );
}

#[test]
fn select_tool_starts_drawing_gesture() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Select);
    core.on_pointer_down(pt(1.0, 2.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::Drawing { tool: Tool::Select, .. }));
}

#[test]
fn secondary_button_is_noop() {
    let mut core = EngineCore::new();
    let actions = core.on_pointer_down(pt(50.0, 50.0), Button::Secondary, no_modifiers());
    assert!(actions.is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn pointer_down_while_drawing_abandons_previous_gesture() {
    let mut core = EngineCore::new();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(30.0, 30.0), PRIMARY_HELD, no_modifiers());
    assert!(core.preview.is_some());

    let actions = core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(core.preview.is_none());
    assert!(has_render_needed(&actions));
    assert!(core.doc.is_empty());
    assert_eq!(
        core.input,
        InputState::Drawing { start_world: pt(100.0, 100.0), tool: Tool::Rectangle }
    );
}

// =============================================================
// Pointer move: panning
// =============================================================

#[test]
fn panning_updates_camera() {
    let mut core = EngineCore::new();
    core.input = InputState::Panning { last_screen: pt(100.0, 100.0) };
    let actions = core.on_pointer_move(pt(120.0, 110.0), PRIMARY_HELD, no_modifiers());
    assert_eq!(core.camera.pan_x, 20.0);
    assert_eq!(core.camera.pan_y, 10.0);
    assert!(has_render_needed(&actions));
}

#[test]
fn panning_accumulates_every_event() {
    let mut core = EngineCore::new();
    core.input = InputState::Panning { last_screen: pt(0.0, 0.0) };
    core.on_pointer_move(pt(10.0, 5.0), PRIMARY_HELD, no_modifiers());
    core.on_pointer_move(pt(11.0, 5.5), PRIMARY_HELD, no_modifiers());
    core.on_pointer_move(pt(20.0, 15.0), PRIMARY_HELD, no_modifiers());
    assert_eq!(core.camera.pan_x, 20.0);
    assert_eq!(core.camera.pan_y, 15.0);
    assert_eq!(core.input, InputState::Panning { last_screen: pt(20.0, 15.0) });
}

#[test]
fn panning_leaves_zoom_alone() {
    let mut core = EngineCore::new();
    core.camera.zoom = 2.5;
    core.input = InputState::Panning { last_screen: pt(0.0, 0.0) };
    core.on_pointer_move(pt(40.0, 40.0), PRIMARY_HELD, no_modifiers());
    assert_eq!(core.camera.zoom, 2.5);
}

// =============================================================
// Pointer move: drawing
// =============================================================

#[test]
fn drawing_move_builds_preview_without_committing() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Diamond);
    core.on_pointer_down(pt(10.0, 20.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_move(pt(60.0, 80.0), PRIMARY_HELD, no_modifiers());
    assert!(has_render_needed(&actions));
    assert_eq!(core.preview, Some(Shape::new(ShapeKind::Diamond, pt(10.0, 20.0), pt(60.0, 80.0))));
    assert!(core.doc.is_empty());
}

#[test]
fn drawing_preview_is_rebuilt_each_move() {
    let mut core = EngineCore::new();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(10.0, 10.0), PRIMARY_HELD, no_modifiers());
    core.on_pointer_move(pt(-5.0, 25.0), PRIMARY_HELD, no_modifiers());
    let preview = core.preview.unwrap();
    assert_eq!(preview.end(), pt(-5.0, 25.0));
    assert_eq!(preview.start(), pt(0.0, 0.0));
}

#[test]
fn drawing_preview_in_scene() {
    let mut core = EngineCore::new();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(10.0, 10.0), PRIMARY_HELD, no_modifiers());
    let scene = core.scene();
    assert!(scene.preview.is_some());
    assert!(scene.shapes.is_empty());
}

#[test]
fn select_tool_move_has_no_preview() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Select);
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(40.0, 40.0), PRIMARY_HELD, no_modifiers());
    assert!(core.preview.is_none());
}

#[test]
fn idle_move_is_noop() {
    let mut core = EngineCore::new();
    let actions = core.on_pointer_move(pt(40.0, 40.0), PRIMARY_HELD, no_modifiers());
    assert!(actions.is_empty());
}

#[test]
fn buttonless_move_ends_stuck_pan() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Hand);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(60.0, 60.0), PRIMARY_HELD, no_modifiers());

    // Button released outside the canvas; the next event is a plain hover.
    let actions = core.on_pointer_move(pt(300.0, 300.0), 0, no_modifiers());
    assert!(core.input.is_idle());
    assert_eq!(cursor_of(&actions), Some(Cursor::Grab));
    assert_eq!(core.camera.pan_x, 10.0);
    assert_eq!(core.camera.pan_y, 10.0);

    core.on_pointer_move(pt(400.0, 400.0), 0, no_modifiers());
    assert_eq!(core.camera.pan_x, 10.0);
}

#[test]
fn buttonless_move_abandons_drawing_without_commit() {
    let mut core = EngineCore::new();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(40.0, 40.0), PRIMARY_HELD, no_modifiers());
    let actions = core.on_pointer_move(pt(90.0, 90.0), 0, no_modifiers());
    assert!(has_render_needed(&actions));
    assert!(core.input.is_idle());
    assert!(core.preview.is_none());

    core.on_pointer_up(pt(90.0, 90.0), Button::Primary, no_modifiers());
    assert!(core.doc.is_empty());
}

#[test]
fn middle_button_held_keeps_panning() {
    let mut core = EngineCore::new();
    core.on_pointer_down(pt(0.0, 0.0), Button::Middle, no_modifiers());
    core.on_pointer_move(pt(15.0, 5.0), 4, no_modifiers());
    assert!(matches!(core.input, InputState::Panning { .. }));
    assert_eq!(core.camera.pan_x, 15.0);
}

#[test]
fn buttonless_move_when_idle_is_noop() {
    let mut core = EngineCore::new();
    assert!(core.on_pointer_move(pt(5.0, 5.0), 0, no_modifiers()).is_empty());
}

// =============================================================
// Pointer up
// =============================================================

#[test]
fn pointer_up_panning_returns_to_idle_with_grab_cursor() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Hand);
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_up(pt(5.0, 5.0), Button::Primary, no_modifiers());
    assert!(core.input.is_idle());
    assert_eq!(cursor_of(&actions), Some(Cursor::Grab));
}

#[test]
fn pointer_up_middle_pan_restores_tool_cursor() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    core.on_pointer_down(pt(0.0, 0.0), Button::Middle, no_modifiers());
    let actions = core.on_pointer_up(pt(5.0, 5.0), Button::Middle, no_modifiers());
    assert_eq!(cursor_of(&actions), Some(Cursor::Crosshair));
}

#[test]
fn pointer_up_drawing_commits_shape() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    let actions = drag(&mut core, pt(10.0, 20.0), pt(110.0, 120.0));
    assert!(has_shape_created(&actions));
    assert!(has_render_needed(&actions));
    assert!(core.input.is_idle());
    assert!(core.preview.is_none());
    assert_eq!(core.shapes(), &[Shape::new(ShapeKind::Line, pt(10.0, 20.0), pt(110.0, 120.0))]);
}

#[test]
fn pointer_up_keeps_drag_order_not_normalized() {
    let mut core = EngineCore::new();
    drag(&mut core, pt(200.0, 150.0), pt(50.0, 40.0));
    let shape = core.shapes()[0];
    assert_eq!(shape.start(), pt(200.0, 150.0));
    assert_eq!(shape.end(), pt(50.0, 40.0));
}

#[test]
fn pointer_up_one_axis_difference_commits() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    drag(&mut core, pt(10.0, 10.0), pt(10.0, 60.0));
    assert_eq!(core.doc.len(), 1);
}

#[test]
fn pointer_up_select_tool_commits_nothing() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Select);
    let actions = drag(&mut core, pt(0.0, 0.0), pt(50.0, 50.0));
    assert!(!has_shape_created(&actions));
    assert!(core.doc.is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn pointer_up_when_idle_is_noop() {
    let mut core = EngineCore::new();
    let actions = core.on_pointer_up(pt(0.0, 0.0), Button::Primary, no_modifiers());
    assert!(actions.is_empty());
}

#[test]
fn pointer_up_uses_camera_at_release() {
    let mut core = EngineCore::new();
    core.camera = Camera { pan_x: 100.0, pan_y: 0.0, zoom: 2.0 };
    drag(&mut core, pt(100.0, 0.0), pt(300.0, 100.0));
    assert_eq!(core.shapes()[0].end(), pt(100.0, 50.0));
}

// =============================================================
// Degenerate drags
// =============================================================

#[test]
fn zero_length_drag_never_grows_the_list() {
    for tool in Tool::ALL {
        let mut core = EngineCore::new();
        core.set_tool(tool);
        for p in [pt(0.0, 0.0), pt(12.5, -3.0), pt(400.0, 300.0)] {
            let actions = core.on_pointer_down(p, Button::Primary, no_modifiers());
            assert!(!has_shape_created(&actions));
            let actions = core.on_pointer_up(p, Button::Primary, no_modifiers());
            assert!(!has_shape_created(&actions));
        }
        assert!(core.doc.is_empty(), "{tool} grew the list");
    }
}

#[test]
fn drag_returning_to_start_is_discarded() {
    let mut core = EngineCore::new();
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(80.0, 80.0), PRIMARY_HELD, no_modifiers());
    core.on_pointer_up(pt(10.0, 10.0), Button::Primary, no_modifiers());
    assert!(core.doc.is_empty());
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_without_modifier_does_nothing() {
    let mut core = EngineCore::new();
    let actions = core.on_wheel(pt(400.0, 300.0), WheelDelta { dx: 10.0, dy: 20.0 }, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.camera.pan_x, 0.0);
    assert_eq!(core.camera.pan_y, 0.0);
    assert_eq!(core.camera.zoom, 1.0);
}

#[test]
fn wheel_ctrl_scroll_up_zooms_in_by_tick() {
    let mut core = EngineCore::new();
    let actions = core.on_wheel(pt(400.0, 300.0), WheelDelta { dx: 0.0, dy: -10.0 }, ctrl_modifier());
    assert_eq!(core.camera.zoom, 1.1);
    assert!(has_render_needed(&actions));
}

#[test]
fn wheel_meta_scroll_down_zooms_out_by_tick() {
    let mut core = EngineCore::new();
    core.on_wheel(pt(400.0, 300.0), WheelDelta { dx: 0.0, dy: 250.0 }, meta_modifier());
    assert_eq!(core.camera.zoom, 0.9);
}

#[test]
fn wheel_zero_delta_is_noop() {
    let mut core = EngineCore::new();
    let actions = core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 5.0, dy: 0.0 }, ctrl_modifier());
    assert!(actions.is_empty());
    assert_eq!(core.camera.zoom, 1.0);
}

#[test]
fn wheel_zoom_clamps() {
    let mut core = EngineCore::new();
    for _ in 0..200 {
        core.on_wheel(pt(400.0, 300.0), WheelDelta { dx: 0.0, dy: -100.0 }, ctrl_modifier());
    }
    assert_eq!(core.camera.zoom, ZOOM_MAX);
    for _ in 0..200 {
        core.on_wheel(pt(400.0, 300.0), WheelDelta { dx: 0.0, dy: 100.0 }, ctrl_modifier());
    }
    assert_eq!(core.camera.zoom, ZOOM_MIN);
}

#[test]
fn wheel_zoom_preserves_world_point_under_cursor() {
    let mut core = EngineCore::new();
    core.camera = Camera { pan_x: -35.0, pan_y: 12.0, zoom: 1.7 };
    let screen = pt(400.0, 300.0);
    for dy in [-10.0, -10.0, 10.0, -3.0, 7.0] {
        let before = core.camera.screen_to_world(screen);
        core.on_wheel(screen, WheelDelta { dx: 0.0, dy }, ctrl_modifier());
        let after = core.camera.screen_to_world(screen);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }
}

// =============================================================
// Cancel
// =============================================================

#[test]
fn cancel_drawing_commits_nothing() {
    let mut core = EngineCore::new();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(50.0, 50.0), PRIMARY_HELD, no_modifiers());
    let actions = core.cancel_gesture();
    assert!(has_render_needed(&actions));
    assert_eq!(cursor_of(&actions), Some(Cursor::Crosshair));
    assert!(core.input.is_idle());
    assert!(core.preview.is_none());

    // A stray pointer-up after cancel does nothing.
    core.on_pointer_up(pt(50.0, 50.0), Button::Primary, no_modifiers());
    assert!(core.doc.is_empty());
}

#[test]
fn cancel_panning_keeps_camera() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Hand);
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(30.0, 40.0), PRIMARY_HELD, no_modifiers());
    let actions = core.cancel_gesture();
    assert_eq!(cursor_of(&actions), Some(Cursor::Grab));
    assert_eq!(core.camera.pan_x, 30.0);
    assert_eq!(core.camera.pan_y, 40.0);
}

#[test]
fn cancel_when_idle_is_noop() {
    let mut core = EngineCore::new();
    assert!(core.cancel_gesture().is_empty());
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn set_viewport_records_size_and_requests_render() {
    let mut core = EngineCore::new();
    core.camera = Camera { pan_x: 5.0, pan_y: 6.0, zoom: 2.0 };
    let actions = core.set_viewport(1024.0, 768.0, 2.0);
    assert!(has_render_needed(&actions));
    assert_eq!(core.viewport, Viewport { width: 1024.0, height: 768.0, dpr: 2.0 });
    assert_eq!(core.camera.pan_x, 5.0);
    assert_eq!(core.camera.zoom, 2.0);
}

// =============================================================
// Remote shapes
// =============================================================

#[test]
fn apply_remote_appends_in_delivery_order() {
    let mut core = EngineCore::new();
    let a = Shape::new(ShapeKind::Circle, pt(0.0, 0.0), pt(10.0, 10.0));
    let b = Shape::new(ShapeKind::Line, pt(5.0, 5.0), pt(6.0, 6.0));
    assert!(has_render_needed(&core.apply_remote(a).unwrap()));
    core.apply_remote(b).unwrap();
    assert_eq!(core.shapes(), &[a, b]);
}

#[test]
fn apply_remote_does_not_dedup_against_local() {
    let mut core = EngineCore::new();
    drag(&mut core, pt(0.0, 0.0), pt(10.0, 10.0));
    let local = core.shapes()[0];
    core.apply_remote(local).unwrap();
    assert_eq!(core.doc.len(), 2);
}

#[test]
fn apply_remote_ignores_camera() {
    let mut core = EngineCore::new();
    core.camera = Camera { pan_x: 100.0, pan_y: 100.0, zoom: 3.0 };
    core.apply_remote_json(r#"{"type":"diamond","startX":1,"startY":2,"endX":3,"endY":4}"#)
        .unwrap();
    assert_eq!(core.shapes()[0], Shape::new(ShapeKind::Diamond, pt(1.0, 2.0), pt(3.0, 4.0)));
}

#[test]
fn apply_remote_json_rejects_unknown_type() {
    let mut core = EngineCore::new();
    let err = core
        .apply_remote_json(r#"{"type":"hand","startX":1,"startY":2,"endX":3,"endY":4}"#)
        .unwrap_err();
    assert!(matches!(err, EngineError::Decode(_)));
    assert!(core.doc.is_empty());
}

#[test]
fn apply_remote_rejects_non_finite() {
    let mut core = EngineCore::new();
    let bad = Shape::new(ShapeKind::Line, pt(f64::NAN, 0.0), pt(1.0, 1.0));
    assert!(core.apply_remote(bad).is_err());
    assert!(core.doc.is_empty());
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn scenario_rectangle_drag() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Rectangle);
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(100.0, 100.0), PRIMARY_HELD, no_modifiers());
    let actions = core.on_pointer_up(pt(250.0, 180.0), Button::Primary, no_modifiers());

    let expected = Shape {
        kind: ShapeKind::Rectangle,
        start_x: 100.0,
        start_y: 100.0,
        end_x: 250.0,
        end_y: 180.0,
    };
    assert_eq!(core.shapes(), &[expected]);
    assert!(actions.contains(&Action::ShapeCreated(expected)));
}

#[test]
fn scenario_pan_then_draw() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Hand);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(150.0, 120.0), PRIMARY_HELD, no_modifiers());
    assert_eq!(core.camera.pan_x, 100.0);
    assert_eq!(core.camera.pan_y, 70.0);
    assert_eq!(core.camera.zoom, 1.0);
    core.on_pointer_up(pt(150.0, 120.0), Button::Primary, no_modifiers());

    core.set_tool(Tool::Circle);
    core.on_pointer_down(pt(150.0, 120.0), Button::Primary, no_modifiers());
    assert_eq!(core.input, InputState::Drawing { start_world: pt(50.0, 50.0), tool: Tool::Circle });
}

#[test]
fn scenario_zoom_in_at_cursor() {
    let mut core = EngineCore::new();
    let p = pt(400.0, 300.0);
    let before = core.camera.screen_to_world(p);
    core.camera.zoom_at(p, 1.1);
    assert_eq!(core.camera.zoom, 1.1);
    let after = core.camera.screen_to_world(p);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn scenario_no_op_line_drag_discarded() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    core.on_pointer_down(pt(75.0, 75.0), Button::Primary, no_modifiers());
    core.on_pointer_up(pt(75.0, 75.0), Button::Primary, no_modifiers());
    assert!(core.doc.is_empty());
}
