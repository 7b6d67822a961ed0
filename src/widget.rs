//! The interactive curve widget.
//!
//! A [`CubicBezierWidget`] owns its configuration and the expanded control
//! points, draws them through a [`Renderer`], translates pointer input on its
//! markers into control point drags and can animate towards new points.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use log::{debug, warn};
use nalgebra::Vector2;

use crate::config::{ConfigPatch, CurveConfig};
use crate::draw::build_path_command;
use crate::easing::Easing;
use crate::error::Result;
use crate::geometry::{CubicCurve, END_ANCHOR, END_HANDLE, START_ANCHOR, START_HANDLE};
use crate::render::{Attributes, ElementId, Renderer, Tag};
use crate::scheduler::Clock;
use crate::style::Style;
use crate::tween::{
    Tween, TweenHandle, TweenState, DEFAULT_DELAY, DEFAULT_DURATION, DEFAULT_FPS,
};

/// Radius of the anchor and control point markers
pub const MARKER_RADIUS: f64 = 4.0;

/// Hook invoked with the index of a control point the pointer went down on
pub type PointerDownHook = Box<dyn FnMut(usize, &CubicCurve)>;

#[derive(Default)]
struct Elements {
    curve: Option<ElementId>,
    anchors: [Option<ElementId>; 2],
    handles: [Option<ElementId>; 2],
    lines: [Option<ElementId>; 2],
}

/// Parameters of [`animate_to`]
#[derive(Clone, Copy, Debug)]
pub struct TweenOptions {
    /// Duration in ms
    pub duration: f64,
    /// Delay in ms before the animation starts
    pub delay: f64,
    /// Updates per second
    pub fps: f64,
    /// Shape of the animation
    pub easing: Easing,
}

impl Default for TweenOptions {
    fn default() -> Self {
        TweenOptions {
            duration: DEFAULT_DURATION,
            delay: DEFAULT_DELAY,
            fps: DEFAULT_FPS,
            easing: Easing::default(),
        }
    }
}

/// A cubic bezier curve with optional draggable control points
pub struct CubicBezierWidget {
    config: CurveConfig,
    curve: CubicCurve,
    elements: Elements,
    targets: BTreeMap<ElementId, usize>,
    dragging: Option<usize>,
    on_pointer_down: Option<PointerDownHook>,
}

impl fmt::Debug for CubicBezierWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubicBezierWidget")
            .field("curve", &self.curve)
            .field("dragging", &self.dragging)
            .finish_non_exhaustive()
    }
}

/// Creates the element in `slot` or updates it if it already exists
fn upsert<R: Renderer + ?Sized>(
    renderer: &mut R,
    slot: &mut Option<ElementId>,
    tag: Tag,
    style: &Style,
    attributes: Attributes,
) -> ElementId {
    match *slot {
        Some(id) => {
            renderer.set_attributes(id, attributes);
            id
        }
        None => {
            let id = renderer.create(tag, style, attributes);
            *slot = Some(id);
            id
        }
    }
}

fn remove<R: Renderer + ?Sized>(renderer: &mut R, slot: &mut Option<ElementId>) {
    if let Some(id) = slot.take() {
        renderer.destroy(id);
    }
}

fn circle(center: &Vector2<f64>) -> Attributes {
    Attributes::from([
        ("cx", center.x.to_string()),
        ("cy", center.y.to_string()),
        ("r", MARKER_RADIUS.to_string()),
    ])
}

fn line(from: &Vector2<f64>, to: &Vector2<f64>) -> Attributes {
    Attributes::from([
        ("x1", from.x.to_string()),
        ("y1", from.y.to_string()),
        ("x2", to.x.to_string()),
        ("y2", to.y.to_string()),
    ])
}

fn marker_url(id: &str) -> String {
    if id.is_empty() {
        "none".to_string()
    } else {
        format!("url(#{})", id)
    }
}

impl CubicBezierWidget {
    /// Validates `config` and computes the curve. Nothing is drawn yet.
    pub fn new(config: CurveConfig) -> Result<Self> {
        config.validate()?;
        let curve = CubicCurve::from_points(&config.points, config.dual_direction)?;
        Ok(CubicBezierWidget {
            config,
            curve,
            elements: Elements::default(),
            targets: BTreeMap::new(),
            dragging: None,
            on_pointer_down: None,
        })
    }

    /// Sets the hook called when the pointer goes down on a control point
    pub fn on_control_point_down<F>(&mut self, hook: F)
    where
        F: FnMut(usize, &CubicCurve) + 'static,
    {
        self.on_pointer_down = Some(Box::new(hook));
    }

    /// Current configuration
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// The curve as last computed
    pub fn curve(&self) -> &CubicCurve {
        &self.curve
    }

    /// All four control points
    pub fn control_points(&self) -> [Vector2<f64>; 4] {
        self.curve.points()
    }

    /// Index of the control point currently being dragged
    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Applies `patch`, recomputes the curve and redraws.
    ///
    /// An invalid patch leaves the widget untouched.
    pub fn update<R: Renderer + ?Sized>(
        &mut self,
        patch: ConfigPatch,
        renderer: &mut R,
    ) -> Result<()> {
        let mut config = self.config.clone();
        config.apply(patch);
        config.validate()?;
        self.curve = CubicCurve::from_points(&config.points, config.dual_direction)?;
        self.config = config;
        self.draw(renderer);
        Ok(())
    }

    /// Replaces the control points (2 or 4) and redraws
    pub fn set_points<R: Renderer + ?Sized>(
        &mut self,
        points: &[Vector2<f64>],
        renderer: &mut R,
    ) -> Result<()> {
        let curve = CubicCurve::from_points(points, self.config.dual_direction)?;
        self.config.points = points.to_vec();
        self.curve = curve;
        self.draw(renderer);
        Ok(())
    }

    /// Draws the widget, creating its elements on the first call and
    /// updating them afterwards.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.draw_curve(renderer);
        if self.config.show_control_points {
            self.draw_control_points(renderer);
        } else {
            self.hide_control_points(renderer);
        }
    }

    fn draw_curve<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let attributes = Attributes::from([
            ("d", build_path_command(&self.curve)),
            ("marker-start", marker_url(&self.config.start_marker_id)),
            ("marker-end", marker_url(&self.config.end_marker_id)),
        ]);
        upsert(
            renderer,
            &mut self.elements.curve,
            Tag::Path,
            &self.config.style_curve,
            attributes,
        );
    }

    fn draw_control_points<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let points = self.curve.points();
        let pairs = [(START_ANCHOR, START_HANDLE), (END_ANCHOR, END_HANDLE)];

        for (side, (anchor, handle)) in pairs.into_iter().enumerate() {
            let id = upsert(
                renderer,
                &mut self.elements.anchors[side],
                Tag::Circle,
                &self.config.style_anchor_points,
                circle(&points[anchor]),
            );
            self.targets.insert(id, anchor);

            upsert(
                renderer,
                &mut self.elements.lines[side],
                Tag::Line,
                &self.config.style_handles,
                line(&points[anchor], &points[handle]),
            );

            let id = upsert(
                renderer,
                &mut self.elements.handles[side],
                Tag::Circle,
                &self.config.style_control_points,
                circle(&points[handle]),
            );
            self.targets.insert(id, handle);
        }
    }

    fn hide_control_points<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let Elements {
            anchors,
            handles,
            lines,
            ..
        } = &mut self.elements;
        for slot in anchors.iter_mut().chain(handles).chain(lines) {
            remove(renderer, slot);
        }
        self.targets.clear();
        self.dragging = None;
    }

    /// Destroys every element the widget created
    pub fn remove<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.hide_control_points(renderer);
        remove(renderer, &mut self.elements.curve);
    }

    /// Control point drawn by `element`, if any
    pub fn control_point_of(&self, element: ElementId) -> Option<usize> {
        self.targets.get(&element).copied()
    }

    /// The pointer went down on `element`.
    ///
    /// If it is one of the widget's markers, a drag of its control point begins
    /// and the pointer-down hook is called. Returns the control point's index.
    pub fn pointer_down(&mut self, element: ElementId) -> Option<usize> {
        let index = self.control_point_of(element)?;
        self.dragging = Some(index);
        if let Some(hook) = self.on_pointer_down.as_mut() {
            hook(index, &self.curve);
        }
        debug!("started dragging control point {}", index);
        Some(index)
    }

    /// The pointer moved to `position`.
    ///
    /// While dragging, the dragged control point is moved there and the curve
    /// is redrawn. From then on all four points are kept as given.
    /// Returns whether anything changed.
    pub fn pointer_move<R: Renderer + ?Sized>(
        &mut self,
        position: Vector2<f64>,
        renderer: &mut R,
    ) -> Result<bool> {
        let Some(index) = self.dragging else {
            return Ok(false);
        };
        self.drag_to(index, position, renderer)?;
        Ok(true)
    }

    /// The pointer was released, ending any drag
    pub fn pointer_up(&mut self) {
        self.dragging = None;
    }

    /// Moves control point `index` to `position` and redraws
    pub fn drag_to<R: Renderer + ?Sized>(
        &mut self,
        index: usize,
        position: Vector2<f64>,
        renderer: &mut R,
    ) -> Result<()> {
        let mut curve = self.curve.clone();
        curve.set_point(index, position)?;
        self.set_points(&curve.points(), renderer)
    }
}

/// Animates `widget` from its current control points to `target`.
///
/// `target` holds either two anchors, whose handles are derived with the
/// widget's direction mode, or all four control points. The widget is redrawn
/// on every update and keeps the target's points once the animation completes.
pub fn animate_to<R: Renderer + 'static>(
    widget: &Rc<RefCell<CubicBezierWidget>>,
    renderer: &Rc<RefCell<R>>,
    clock: &Clock,
    target: &[Vector2<f64>],
    options: TweenOptions,
) -> Result<TweenHandle> {
    let (start, end) = {
        let widget = widget.borrow();
        let end = CubicCurve::from_points(target, widget.config.dual_direction)?;
        (widget.curve.tween_state(), end)
    };
    let state = Rc::new(RefCell::new(start));

    let on_update = {
        let (widget, renderer) = (widget.clone(), renderer.clone());
        move |state: &TweenState| {
            // The state always holds all eight coordinates
            if let Ok(curve) = CubicCurve::from_tween_state(state) {
                let mut widget = widget.borrow_mut();
                widget.curve = curve;
                widget.draw(&mut *renderer.borrow_mut());
            }
        }
    };
    let on_complete = {
        let (widget, renderer) = (widget.clone(), renderer.clone());
        let target = target.to_vec();
        move |_: &TweenState| {
            let mut widget = widget.borrow_mut();
            if let Err(e) = widget.set_points(&target, &mut *renderer.borrow_mut()) {
                warn!("could not settle animation: {}", e);
            }
        }
    };

    let handle = Tween::new(state)
        .to(&end.tween_state(), options.duration)?
        .delay(options.delay)
        .fps(options.fps)
        .easing(options.easing)
        .on_update(on_update)
        .on_complete(on_complete)
        .start(clock)?;
    Ok(handle)
}
