//! # Interaction
//!
//! Edit-mode drag, resize and rotate of positioned block elements.
//!
//! A [`DragSession`] lives from `pointer_down` to `pointer_up` (or `cancel`).
//! Each `pointer_move` recomputes the element geometry from the pointer delta
//! against the geometry captured at `pointer_down`, then reports it to the
//! [`GeometryObserver`]. Nothing runs between events and nothing continues
//! after release.
//!
//! Coordinates are percent of the block box, rotation is in degrees.

use crate::errors::{RenderError, RenderResult};
use letter_schema::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
        ResizeHandle::Ne,
        ResizeHandle::Nw,
        ResizeHandle::Se,
        ResizeHandle::Sw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::Ne => "ne",
            ResizeHandle::Nw => "nw",
            ResizeHandle::Se => "se",
            ResizeHandle::Sw => "sw",
        }
    }

    fn north(&self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::Ne | ResizeHandle::Nw)
    }

    fn south(&self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::Se | ResizeHandle::Sw)
    }

    fn east(&self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::Ne | ResizeHandle::Se)
    }

    fn west(&self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::Nw | ResizeHandle::Sw)
    }

    pub fn is_corner(&self) -> bool {
        (self.north() || self.south()) && (self.east() || self.west())
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| RenderError::Generic(format!("Unknown resize handle: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Operation {
    Move,
    Resize { handle: ResizeHandle },
    Rotate { center: Point },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self { shift: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DragConfig {
    /// Snap step in percent; 0 disables snapping
    pub grid: f64,
    /// Smallest width/height in percent
    pub min_size: f64,
    pub keep_aspect_ratio: bool,
    /// Rotation step with shift held, in degrees
    pub rotation_snap: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            grid: 1.0,
            min_size: 1.0,
            keep_aspect_ratio: false,
            rotation_snap: 15.0,
        }
    }
}

impl DragConfig {
    /// `min_size` in `(0, 100]`, `grid` and `rotation_snap` finite and not negative
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.min_size > 0.0 && self.min_size <= 100.0) {
            return Err(RenderError::InvalidDragConfig(format!(
                "minSize must be in (0, 100], got {}",
                self.min_size
            )));
        }
        if !(self.grid.is_finite() && self.grid >= 0.0) {
            return Err(RenderError::InvalidDragConfig(format!(
                "grid must be >= 0, got {}",
                self.grid
            )));
        }
        if !(self.rotation_snap.is_finite() && self.rotation_snap >= 0.0) {
            return Err(RenderError::InvalidDragConfig(format!(
                "rotationSnap must be >= 0, got {}",
                self.rotation_snap
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragTarget {
    pub block_id: String,
    pub element_id: String,
}

impl DragTarget {
    pub fn new(block_id: impl Into<String>, element_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            element_id: element_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangePhase {
    /// Pointer still down
    Update,
    /// Pointer released; the editor should persist `geometry`
    Commit,
    /// Drag abandoned; `geometry` is the original
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryChange {
    pub target: DragTarget,
    pub operation: Operation,
    pub phase: ChangePhase,
    pub geometry: Geometry,
    pub original: Geometry,
}

/// Receives every geometry the session computes
pub trait GeometryObserver {
    fn on_geometry_change(&mut self, change: &GeometryChange);
}

impl<F: FnMut(&GeometryChange)> GeometryObserver for F {
    fn on_geometry_change(&mut self, change: &GeometryChange) {
        self(change)
    }
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    target: DragTarget,
    operation: Operation,
    start: Point,
    original: Geometry,
    current: Geometry,
}

pub struct DragSession {
    config: DragConfig,
    observer: Option<Box<dyn GeometryObserver>>,
    active: Option<ActiveDrag>,
}

impl fmt::Debug for DragSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("config", &self.config)
            .field("active", &self.active)
            .finish()
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

fn snap(value: f64, grid: f64) -> f64 {
    if grid > 0.0 {
        (value / grid).round() * grid
    } else {
        value
    }
}

fn is_valid(g: &Geometry) -> bool {
    [g.x, g.y, g.width, g.height, g.rotation]
        .iter()
        .all(|v| v.is_finite())
        && g.width > 0.0
        && g.height > 0.0
}

impl DragSession {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            observer: None,
            active: None,
        }
    }

    pub fn with_observer(mut self, observer: impl GeometryObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn pointer_down(
        &mut self,
        target: DragTarget,
        operation: Operation,
        start: Point,
        geometry: Geometry,
    ) -> RenderResult<()> {
        self.config.validate()?;
        if !is_valid(&geometry) {
            return Err(RenderError::InvalidGeometry(format!(
                "{}x{} at ({}, {})",
                geometry.width, geometry.height, geometry.x, geometry.y
            )));
        }

        debug!(
            block_id = %target.block_id,
            element_id = %target.element_id,
            ?operation,
            "Drag started"
        );

        self.active = Some(ActiveDrag {
            target,
            operation,
            start,
            original: geometry,
            current: geometry,
        });
        Ok(())
    }

    pub fn pointer_move(&mut self, point: Point, modifiers: Modifiers) -> RenderResult<Geometry> {
        let config = self.config;
        let drag = self.active.as_mut().ok_or(RenderError::NoActiveSession)?;

        let next = match drag.operation {
            Operation::Move => move_to(&config, drag, point),
            Operation::Resize { handle } => resize(&config, drag, handle, point, modifiers),
            Operation::Rotate { center } => rotate(&config, drag, center, point, modifiers),
        };
        drag.current = next;
        trace!(x = next.x, y = next.y, w = next.width, h = next.height, r = next.rotation, "Drag update");

        let change = GeometryChange {
            target: drag.target.clone(),
            operation: drag.operation,
            phase: ChangePhase::Update,
            geometry: next,
            original: drag.original,
        };
        self.notify(&change);
        Ok(next)
    }

    /// Release the pointer and end the session
    pub fn pointer_up(&mut self) -> RenderResult<GeometryChange> {
        let drag = self.active.take().ok_or(RenderError::NoActiveSession)?;
        let change = GeometryChange {
            target: drag.target,
            operation: drag.operation,
            phase: ChangePhase::Commit,
            geometry: drag.current,
            original: drag.original,
        };
        debug!(element_id = %change.target.element_id, "Drag committed");
        self.notify(&change);
        Ok(change)
    }

    /// Abandon the drag and restore the original geometry
    pub fn cancel(&mut self) -> RenderResult<Geometry> {
        let drag = self.active.take().ok_or(RenderError::NoActiveSession)?;
        let change = GeometryChange {
            target: drag.target,
            operation: drag.operation,
            phase: ChangePhase::Cancel,
            geometry: drag.original,
            original: drag.original,
        };
        debug!(element_id = %change.target.element_id, "Drag cancelled");
        self.notify(&change);
        Ok(drag.original)
    }

    fn notify(&mut self, change: &GeometryChange) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_geometry_change(change);
        }
    }
}

fn move_to(config: &DragConfig, drag: &ActiveDrag, point: Point) -> Geometry {
    let o = drag.original;
    let x = snap(o.x + point.x - drag.start.x, config.grid).clamp(0.0, (100.0 - o.width).max(0.0));
    let y = snap(o.y + point.y - drag.start.y, config.grid).clamp(0.0, (100.0 - o.height).max(0.0));
    Geometry { x, y, ..o }
}

fn resize(
    config: &DragConfig,
    drag: &ActiveDrag,
    handle: ResizeHandle,
    point: Point,
    modifiers: Modifiers,
) -> Geometry {
    let o = drag.original;
    let dx = point.x - drag.start.x;
    let dy = point.y - drag.start.y;

    let mut width = o.width;
    let mut height = o.height;
    if handle.east() {
        width = o.width + dx;
    }
    if handle.west() {
        width = o.width - dx;
    }
    if handle.south() {
        height = o.height + dy;
    }
    if handle.north() {
        height = o.height - dy;
    }

    if (config.keep_aspect_ratio || modifiers.shift) && handle.is_corner() {
        let ratio = o.width / o.height;
        // The axis that moved further (relative to its size) drives the other
        if ((width - o.width) / o.width).abs() >= ((height - o.height) / o.height).abs() {
            height = width / ratio;
        } else {
            width = height * ratio;
        }
    }

    let min_size = config.min_size.min(100.0);
    let width = snap(width, config.grid).max(min_size).min(100.0);
    let height = snap(height, config.grid).max(min_size).min(100.0);

    // North and west handles keep the opposite edge fixed
    let x = if handle.west() { o.x + o.width - width } else { o.x };
    let y = if handle.north() { o.y + o.height - height } else { o.y };

    Geometry {
        x: x.clamp(0.0, (100.0 - width).max(0.0)),
        y: y.clamp(0.0, (100.0 - height).max(0.0)),
        width,
        height,
        rotation: o.rotation,
    }
}

fn rotate(
    config: &DragConfig,
    drag: &ActiveDrag,
    center: Point,
    point: Point,
    modifiers: Modifiers,
) -> Geometry {
    let mut angle = (point.y - center.y).atan2(point.x - center.x).to_degrees() + 90.0;
    if modifiers.shift && config.rotation_snap > 0.0 {
        angle = (angle / config.rotation_snap).round() * config.rotation_snap;
    }
    Geometry {
        rotation: angle.rem_euclid(360.0),
        ..drag.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn target() -> DragTarget {
        DragTarget::new("hero-1", "title")
    }

    fn start(session: &mut DragSession, op: Operation, geometry: Geometry) {
        session
            .pointer_down(target(), op, Point::new(50.0, 50.0), geometry)
            .expect("Failed to start drag");
    }

    #[test]
    fn test_move_snaps_and_clamps() {
        let mut session = DragSession::new(DragConfig {
            grid: 5.0,
            ..Default::default()
        });
        start(&mut session, Operation::Move, Geometry::new(10.0, 10.0, 20.0, 20.0));

        let g = session.pointer_move(Point::new(57.0, 52.0), Modifiers::default()).unwrap();
        assert_eq!((g.x, g.y), (15.0, 10.0));

        let g = session.pointer_move(Point::new(200.0, -80.0), Modifiers::default()).unwrap();
        assert_eq!((g.x, g.y), (80.0, 0.0));
    }

    #[test]
    fn test_resize_west_keeps_right_edge() {
        let mut session = DragSession::default();
        start(
            &mut session,
            Operation::Resize { handle: ResizeHandle::W },
            Geometry::new(20.0, 20.0, 30.0, 10.0),
        );

        let g = session.pointer_move(Point::new(40.0, 50.0), Modifiers::default()).unwrap();
        assert_eq!(g.width, 40.0);
        assert_eq!(g.x, 10.0);
        assert_eq!(g.x + g.width, 50.0);
        assert_eq!(g.height, 10.0);
    }

    #[test]
    fn test_resize_respects_min_size() {
        let mut session = DragSession::new(DragConfig {
            min_size: 5.0,
            ..Default::default()
        });
        start(
            &mut session,
            Operation::Resize { handle: ResizeHandle::Se },
            Geometry::new(0.0, 0.0, 10.0, 10.0),
        );

        let g = session.pointer_move(Point::new(0.0, 0.0), Modifiers::default()).unwrap();
        assert_eq!((g.width, g.height), (5.0, 5.0));
    }

    #[test]
    fn test_out_of_range_config_is_rejected() {
        for config in [
            DragConfig { min_size: 150.0, ..Default::default() },
            DragConfig { min_size: 0.0, ..Default::default() },
            DragConfig { grid: -1.0, ..Default::default() },
            DragConfig { rotation_snap: f64::NAN, ..Default::default() },
        ] {
            assert!(matches!(config.validate(), Err(RenderError::InvalidDragConfig(_))));

            let mut session = DragSession::new(config);
            let started = session.pointer_down(
                target(),
                Operation::Resize { handle: ResizeHandle::Se },
                Point::new(50.0, 50.0),
                Geometry::new(0.0, 0.0, 10.0, 10.0),
            );
            assert!(matches!(started, Err(RenderError::InvalidDragConfig(_))));
            assert!(!session.is_active());
            assert_eq!(
                session.pointer_move(Point::new(60.0, 60.0), Modifiers::default()),
                Err(RenderError::NoActiveSession)
            );
        }
    }

    #[test]
    fn test_full_size_min_resizes_to_whole_block() {
        let mut session = DragSession::new(DragConfig {
            min_size: 100.0,
            ..Default::default()
        });
        start(
            &mut session,
            Operation::Resize { handle: ResizeHandle::Se },
            Geometry::new(0.0, 0.0, 10.0, 10.0),
        );

        let g = session.pointer_move(Point::new(55.0, 55.0), Modifiers::default()).unwrap();
        assert_eq!((g.width, g.height), (100.0, 100.0));
    }

    #[test]
    fn test_partial_config_json_keeps_defaults() {
        let config: DragConfig =
            serde_json::from_str(r#"{ "minSize": 5 }"#).expect("Failed to parse config");
        assert_eq!(config.min_size, 5.0);
        assert_eq!(config.grid, DragConfig::default().grid);
    }

    #[test]
    fn test_resize_with_shift_keeps_aspect_ratio() {
        let mut session = DragSession::new(DragConfig {
            grid: 0.0,
            ..Default::default()
        });
        start(
            &mut session,
            Operation::Resize { handle: ResizeHandle::Se },
            Geometry::new(0.0, 0.0, 20.0, 10.0),
        );

        let g = session.pointer_move(Point::new(70.0, 51.0), Modifiers::shift()).unwrap();
        assert_eq!(g.width, 40.0);
        assert_eq!(g.height, 20.0);
    }

    #[test]
    fn test_rotate_snaps_with_shift() {
        let mut session = DragSession::default();
        let center = Point::new(50.0, 50.0);
        start(&mut session, Operation::Rotate { center }, Geometry::new(40.0, 40.0, 20.0, 20.0));

        // Straight right of center is a quarter turn
        let g = session.pointer_move(Point::new(80.0, 50.0), Modifiers::default()).unwrap();
        assert!((g.rotation - 90.0).abs() < 1e-9);

        let g = session.pointer_move(Point::new(80.0, 53.0), Modifiers::shift()).unwrap();
        assert_eq!(g.rotation % 15.0, 0.0);
    }

    #[test]
    fn test_observer_sees_updates_commit_and_cancel() {
        let seen: Rc<RefCell<Vec<ChangePhase>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut session = DragSession::default()
            .with_observer(move |change: &GeometryChange| sink.borrow_mut().push(change.phase));

        let original = Geometry::new(10.0, 10.0, 20.0, 20.0);
        start(&mut session, Operation::Move, original);
        session.pointer_move(Point::new(60.0, 60.0), Modifiers::default()).unwrap();
        let committed = session.pointer_up().unwrap();
        assert_eq!(committed.geometry.x, 20.0);
        assert!(!session.is_active());

        start(&mut session, Operation::Move, original);
        session.pointer_move(Point::new(70.0, 70.0), Modifiers::default()).unwrap();
        assert_eq!(session.cancel().unwrap(), original);

        assert_eq!(
            *seen.borrow(),
            vec![
                ChangePhase::Update,
                ChangePhase::Commit,
                ChangePhase::Update,
                ChangePhase::Cancel
            ]
        );
    }

    #[test]
    fn test_events_without_session_fail() {
        let mut session = DragSession::default();
        assert_eq!(
            session.pointer_move(Point::new(1.0, 1.0), Modifiers::default()),
            Err(RenderError::NoActiveSession)
        );
        assert_eq!(session.pointer_up(), Err(RenderError::NoActiveSession));

        let bad = Geometry::new(0.0, 0.0, 0.0, 10.0);
        assert!(session
            .pointer_down(target(), Operation::Move, Point::default(), bad)
            .is_err());
    }
}
