//! Input model: modes, pointer positions, canvas geometry, and the gesture state machine.
//!
//! `Mode` decides which pointer behaviours are live. `Gesture` is the active
//! drag or resize tracked between pointer-down and pointer-up; it carries all
//! the context needed to compute snapped previews from the accumulated
//! pointer delta and to emit the single commit write on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use crate::doc::{FurnitureId, snap_size, snap_to_grid};
use crate::error::SeatingError;

/// Which interaction mode the engine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Furniture CRUD, drag and resize.
    Setup,
    /// Pairing students with furniture.
    Assign,
    /// Read-mostly; hosts the random picker.
    #[default]
    Interact,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Assign => "assign",
            Self::Interact => "interact",
        })
    }
}

impl FromStr for Mode {
    type Err = SeatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "setup" => Ok(Self::Setup),
            "assign" => Ok(Self::Assign),
            "interact" => Ok(Self::Interact),
            other => Err(SeatingError::UnknownMode(other.to_string())),
        }
    }
}

/// A pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered canvas size and the pixel-to-canvas-unit scale reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub width: f64,
    pub height: f64,
    /// Rendered pixel size divided by logical canvas size.
    pub scale: f64,
}

impl CanvasGeometry {
    #[must_use]
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self { width, height, scale }
    }

    /// Scale usable as a divisor; anything non-finite or non-positive counts as 1.
    #[must_use]
    pub fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 { self.scale } else { 1.0 }
    }
}

/// Transient position of an item being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPreview {
    pub id: FurnitureId,
    pub x: f64,
    pub y: f64,
}

/// Transient size of an item being resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePreview {
    pub id: FurnitureId,
    pub width: f64,
    pub height: f64,
}

/// A move gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveGesture {
    /// Id of the item being dragged.
    pub id: FurnitureId,
    /// Item x at pointer-down.
    pub orig_x: f64,
    /// Item y at pointer-down.
    pub orig_y: f64,
    /// Pointer position at pointer-down.
    pub start: Point,
    /// Canvas scale sampled at pointer-down.
    pub scale: f64,
    /// Latest snapped position.
    pub current: DragPreview,
}

impl MoveGesture {
    /// Recompute the snapped position from the pointer's accumulated delta.
    pub fn update(&mut self, pt: Point, grid_size: f64) -> DragPreview {
        let dx = (pt.x - self.start.x) / self.scale;
        let dy = (pt.y - self.start.y) / self.scale;
        self.current.x = snap_to_grid(self.orig_x + dx, grid_size);
        self.current.y = snap_to_grid(self.orig_y + dy, grid_size);
        self.current
    }
}

/// A resize gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    /// Id of the item being resized.
    pub id: FurnitureId,
    /// Item width at pointer-down.
    pub orig_w: f64,
    /// Item height at pointer-down.
    pub orig_h: f64,
    /// Pointer position at pointer-down.
    pub start: Point,
    /// Canvas scale sampled at pointer-down.
    pub scale: f64,
    /// Latest snapped size.
    pub current: ResizePreview,
}

impl ResizeGesture {
    /// Recompute the snapped size, never below one grid cell.
    pub fn update(&mut self, pt: Point, grid_size: f64) -> ResizePreview {
        let dx = (pt.x - self.start.x) / self.scale;
        let dy = (pt.y - self.start.y) / self.scale;
        self.current.width = snap_size(self.orig_w + dx, grid_size);
        self.current.height = snap_size(self.orig_h + dy, grid_size);
        self.current
    }
}

/// Gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    Moving(MoveGesture),
    Resizing(ResizeGesture),
}

/// Engine-local UI state; never persisted.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: Mode,
    /// Selected furniture (setup mode).
    pub selected_id: Option<FurnitureId>,
    /// Selected student (assign mode).
    pub selected_student: Option<String>,
}

impl UiState {
    /// Drop both selections.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.selected_student = None;
    }
}
