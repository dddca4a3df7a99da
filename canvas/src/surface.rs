//! Browser wiring for a mounted canvas.
//!
//! [`initialize`] binds an [`Engine`] to a canvas element, subscribes to the
//! DOM events the engine consumes, and returns a [`Surface`] that owns those
//! subscriptions. Dropping the surface unsubscribes everything.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, MouseEvent, PointerEvent, WheelEvent};

use crate::camera::Point;
use crate::config::CanvasConfig;
use crate::doc::Shape;
use crate::engine::{Action, Engine};
use crate::error::EngineError;
use crate::input::{Button, Modifiers, Tool, WheelDelta};

type ShapeCallback = Rc<dyn Fn(&Shape)>;

struct Shared {
    engine: RefCell<Engine>,
    callbacks: RefCell<Vec<ShapeCallback>>,
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// A live canvas. Owns the engine and every DOM listener registered for it.
pub struct Surface {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

/// Mount the engine on `canvas`: size the backing store, draw the first
/// frame, and subscribe to pointer, wheel, resize and blur events.
///
/// # Errors
///
/// Returns [`EngineError::ContextUnavailable`] when the canvas has no 2d
/// context, [`EngineError::InvalidConfig`] for a bad config, and
/// [`EngineError::Dom`] when the window is missing or a listener cannot be
/// registered.
pub fn initialize(canvas: HtmlCanvasElement, config: CanvasConfig) -> Result<Surface, EngineError> {
    config.validate()?;
    let window = web_sys::window().ok_or_else(|| EngineError::Dom("no window".into()))?;
    let mut engine = Engine::new(canvas.clone(), config)?;
    let (width, height) = css_size(&canvas);
    let mut actions = engine.set_viewport(width, height, window.device_pixel_ratio());
    actions.extend(engine.core.attach());
    let shared = Rc::new(Shared { engine: RefCell::new(engine), callbacks: RefCell::new(Vec::new()) });
    dispatch(&shared, actions);

    let mut surface = Surface { shared: Rc::clone(&shared), listeners: Vec::new() };
    let canvas_target: &EventTarget = canvas.as_ref();
    let window_target: &EventTarget = window.as_ref();

    let s = Rc::clone(&shared);
    let capture_canvas = canvas.clone();
    surface.listen(canvas_target, "pointerdown", false, move |ev| {
        if let Some(ev) = ev.dyn_ref::<PointerEvent>() {
            // Keep receiving move/up when the pointer leaves the canvas mid-gesture.
            if let Err(e) = capture_canvas.set_pointer_capture(ev.pointer_id()) {
                log::warn!("pointer capture failed: {e:?}");
            }
            let actions = s.engine.borrow_mut().core.on_pointer_down(
                pointer_point(ev),
                Button::from_dom(ev.button()),
                modifiers_of(ev),
            );
            dispatch(&s, actions);
        }
    })?;

    let s = Rc::clone(&shared);
    surface.listen(canvas_target, "pointermove", false, move |ev| {
        if let Some(ev) = ev.dyn_ref::<PointerEvent>() {
            let actions =
                s.engine.borrow_mut().core.on_pointer_move(pointer_point(ev), ev.buttons(), modifiers_of(ev));
            dispatch(&s, actions);
        }
    })?;

    let s = Rc::clone(&shared);
    let release_canvas = canvas.clone();
    surface.listen(canvas_target, "pointerup", false, move |ev| {
        if let Some(ev) = ev.dyn_ref::<PointerEvent>() {
            release_capture(&release_canvas, ev);
            let actions = s.engine.borrow_mut().core.on_pointer_up(
                pointer_point(ev),
                Button::from_dom(ev.button()),
                modifiers_of(ev),
            );
            dispatch(&s, actions);
        }
    })?;

    let s = Rc::clone(&shared);
    let release_canvas = canvas.clone();
    surface.listen(canvas_target, "pointercancel", false, move |ev| {
        if let Some(ev) = ev.dyn_ref::<PointerEvent>() {
            release_capture(&release_canvas, ev);
        }
        let actions = s.engine.borrow_mut().core.cancel_gesture();
        dispatch(&s, actions);
    })?;

    // Non-passive so ctrl+wheel can suppress the browser's page zoom.
    let s = Rc::clone(&shared);
    surface.listen(canvas_target, "wheel", true, move |ev| {
        if let Some(ev) = ev.dyn_ref::<WheelEvent>() {
            let modifiers = modifiers_of(ev);
            if modifiers.accelerator() {
                ev.prevent_default();
            }
            let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
            let actions = s.engine.borrow_mut().core.on_wheel(pointer_point(ev), delta, modifiers);
            dispatch(&s, actions);
        }
    })?;

    let s = Rc::clone(&shared);
    let resize_canvas = canvas.clone();
    let resize_window = window.clone();
    surface.listen(window_target, "resize", false, move |_ev| {
        resize(&s, &resize_canvas, resize_window.device_pixel_ratio());
    })?;

    let s = Rc::clone(&shared);
    surface.listen(window_target, "blur", false, move |_ev| {
        let actions = s.engine.borrow_mut().core.cancel_gesture();
        dispatch(&s, actions);
    })?;

    log::info!("canvas surface initialized ({} listeners)", surface.listeners.len());
    Ok(surface)
}

impl Surface {
    fn listen<F>(&mut self, target: &EventTarget, kind: &'static str, non_passive: bool, handler: F) -> Result<(), EngineError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        let registered = if non_passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(kind, callback, &options)
        } else {
            target.add_event_listener_with_callback(kind, callback)
        };
        registered.map_err(|e| EngineError::dom(&e))?;
        self.listeners.push(Listener { target: target.clone(), kind, closure });
        Ok(())
    }

    fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(e) = listener
                .target
                .remove_event_listener_with_callback(listener.kind, listener.closure.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove {} listener: {e:?}", listener.kind);
            }
        }
    }

    /// Unsubscribe every listener. Equivalent to dropping the surface.
    pub fn dispose(mut self) {
        self.detach();
        log::info!("canvas surface disposed");
    }

    /// Switch the active tool. An in-progress gesture keeps its own tool.
    pub fn set_tool(&self, tool: Tool) {
        let actions = self.shared.engine.borrow_mut().core.set_tool(tool);
        dispatch(&self.shared, actions);
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.shared.engine.borrow().core.tool()
    }

    /// Append a shape received from a collaborator and redraw.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShape`] for non-finite coordinates.
    pub fn apply_remote(&self, shape: Shape) -> Result<(), EngineError> {
        let actions = self.shared.engine.borrow_mut().core.apply_remote(shape)?;
        dispatch(&self.shared, actions);
        Ok(())
    }

    /// Decode a wire-format shape message, append it and redraw.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Decode`] for malformed messages or unknown
    /// shape types, [`EngineError::InvalidShape`] for non-finite coordinates.
    pub fn apply_remote_json(&self, raw: &str) -> Result<(), EngineError> {
        let result = self.shared.engine.borrow_mut().core.apply_remote_json(raw);
        match result {
            Ok(actions) => {
                dispatch(&self.shared, actions);
                Ok(())
            }
            Err(e) => {
                log::warn!("rejected remote shape: {e}");
                Err(e)
            }
        }
    }

    /// Register a hook that receives every locally committed shape, in
    /// commit order. Remote shapes are not echoed.
    pub fn on_shape_created<F>(&self, callback: F)
    where
        F: Fn(&Shape) + 'static,
    {
        self.shared.callbacks.borrow_mut().push(Rc::new(callback));
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if !self.listeners.is_empty() {
            self.detach();
            log::info!("canvas surface dropped");
        }
    }
}

fn css_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    (f64::from(canvas.client_width()), f64::from(canvas.client_height()))
}

fn release_capture(canvas: &HtmlCanvasElement, ev: &PointerEvent) {
    if !canvas.has_pointer_capture(ev.pointer_id()) {
        return;
    }
    if let Err(e) = canvas.release_pointer_capture(ev.pointer_id()) {
        log::warn!("pointer capture release failed: {e:?}");
    }
}

fn resize(shared: &Shared, canvas: &HtmlCanvasElement, dpr: f64) {
    let (width, height) = css_size(canvas);
    let actions = shared.engine.borrow_mut().set_viewport(width, height, dpr);
    dispatch(shared, actions);
}

/// Apply engine actions. The engine borrow is released before shape hooks
/// run so a hook may call back into the surface.
fn dispatch(shared: &Shared, actions: Vec<Action>) {
    let mut created = Vec::new();
    let mut render = false;
    {
        let engine = shared.engine.borrow();
        for action in actions {
            match action {
                Action::ShapeCreated(shape) => created.push(shape),
                Action::SetCursor(cursor) => {
                    if let Err(e) = engine.set_cursor(cursor) {
                        log::warn!("cursor update failed: {e}");
                    }
                }
                Action::RenderNeeded => render = true,
            }
        }
    }

    if render {
        if let Err(e) = shared.engine.borrow_mut().render() {
            log::warn!("frame failed: {e:?}");
        }
    }

    if created.is_empty() {
        return;
    }
    let callbacks = shared.callbacks.borrow().clone();
    for shape in &created {
        for callback in &callbacks {
            callback(shape);
        }
    }
}

fn pointer_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

fn modifiers_of(ev: &MouseEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}
