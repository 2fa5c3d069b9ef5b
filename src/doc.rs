//! Document model: furniture items, assignments, and the persisted configuration.
//!
//! This module defines what is on the seating canvas (`FurnitureItem`,
//! `FurnitureKind`), a sparse-update type for incremental edits
//! (`FurnitureUpdate`), and the whole persisted unit (`Configuration`) that
//! the engine reads and rewrites atomically on every mutation.
//!
//! Furniture and assignments live in the same structure so that any change
//! touching both (delete, clear, template apply) is a single write.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_GRID_SIZE, DEFAULT_TEMPLATE_COLUMNS};
use crate::error::SeatingError;

/// Unique identifier for a furniture item.
pub type FurnitureId = Uuid;

/// Student display name → furniture id.
pub type Assignments = BTreeMap<String, FurnitureId>;

// =============================================================
// Grid math
// =============================================================

/// Round `value` to the nearest multiple of `grid_size`.
///
/// A non-positive grid leaves the value untouched.
#[must_use]
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap a size to the grid with a floor of one grid cell.
#[must_use]
pub fn snap_size(value: f64, grid_size: f64) -> f64 {
    snap_to_grid(value, grid_size).max(grid_size)
}

/// Whether `value` lies on the grid, within a tolerance scaled to `grid_size`.
///
/// Snapped values on fractional grids land a hair either side of a multiple
/// (0.7 snaps to 0.7000000000000001 on a 0.1 grid), so both ends of the
/// remainder count as aligned.
#[must_use]
pub fn is_on_grid(value: f64, grid_size: f64) -> bool {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return false;
    }
    let eps = grid_size * 1e-9;
    let r = value.rem_euclid(grid_size);
    r < eps || grid_size - r < eps
}

// =============================================================
// Furniture
// =============================================================

/// The kind of a furniture item. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FurnitureKind {
    /// Single student desk.
    Desk,
    /// Rectangular group table.
    #[serde(alias = "table-rectangular")]
    TableRect,
    /// Round group table.
    TableRound,
    /// Floor rug (not seatable).
    Rug,
    /// The teacher's desk (not seatable).
    TeacherDesk,
}

impl FurnitureKind {
    pub const ALL: [Self; 5] = [Self::Desk, Self::TableRect, Self::TableRound, Self::Rug, Self::TeacherDesk];

    /// Unsnapped default `(width, height)` for newly created items.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Desk => (80.0, 65.0),
            Self::TableRect => (120.0, 80.0),
            Self::TableRound => (100.0, 100.0),
            Self::Rug => (150.0, 100.0),
            Self::TeacherDesk => (100.0, 60.0),
        }
    }

    /// Palette label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Desk => "Desk",
            Self::TableRect => "Table (Rect)",
            Self::TableRound => "Table (Round)",
            Self::Rug => "Rug",
            Self::TeacherDesk => "Teacher",
        }
    }

    /// Whether students can be seated here by random assignment.
    #[must_use]
    pub fn is_seatable(self) -> bool {
        matches!(self, Self::Desk | Self::TableRect | Self::TableRound)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Desk => "desk",
            Self::TableRect => "table-rect",
            Self::TableRound => "table-round",
            Self::Rug => "rug",
            Self::TeacherDesk => "teacher-desk",
        }
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FurnitureKind {
    type Err = SeatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "table-rectangular" {
            return Ok(Self::TableRect);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SeatingError::UnknownFurnitureKind(s.to_string()))
    }
}

/// A placed object on the canvas, as stored in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    /// Unique identifier for this item.
    pub id: FurnitureId,
    /// Furniture type; serialized as `type`.
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around the item centre.
    pub rotation: f64,
}

impl FurnitureItem {
    /// Create an item of `kind` at its default size, snapped to `grid_size`.
    #[must_use]
    pub fn new(kind: FurnitureKind, x: f64, y: f64, grid_size: f64) -> Self {
        let (w, h) = kind.default_size();
        Self {
            id: Uuid::new_v4(),
            kind,
            x: snap_to_grid(x, grid_size),
            y: snap_to_grid(y, grid_size),
            width: snap_size(w, grid_size),
            height: snap_size(h, grid_size),
            rotation: 0.0,
        }
    }

    /// Whether position and size all lie on the grid.
    #[must_use]
    pub fn is_grid_aligned(&self, grid_size: f64) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| is_on_grid(*v, grid_size))
    }
}

/// Sparse update for a furniture item. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FurnitureUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

// =============================================================
// Template / roster mode
// =============================================================

/// Bulk layout selected for the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Freeform,
    /// Evenly spaced columns; `templateColumns` sets the count.
    #[serde(alias = "columns")]
    Rows,
    Horseshoe,
    Pods,
}

impl Template {
    fn as_str(self) -> &'static str {
        match self {
            Self::Freeform => "freeform",
            Self::Rows => "rows",
            Self::Horseshoe => "horseshoe",
            Self::Pods => "pods",
        }
    }

    /// Whether applying this template requires a non-empty roster.
    #[must_use]
    pub fn needs_roster(self) -> bool {
        !matches!(self, Self::Horseshoe)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = SeatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "freeform" => Ok(Self::Freeform),
            "rows" | "columns" => Ok(Self::Rows),
            "horseshoe" => Ok(Self::Horseshoe),
            "pods" => Ok(Self::Pods),
            other => Err(SeatingError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Where the student list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterMode {
    /// The host's active class roster.
    #[default]
    Class,
    /// Free text typed into the widget, one name per line.
    Custom,
}

impl FromStr for RosterMode {
    type Err = SeatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Self::Class),
            "custom" => Ok(Self::Custom),
            other => Err(SeatingError::UnknownRosterMode(other.to_string())),
        }
    }
}

// =============================================================
// Configuration
// =============================================================

/// The persisted seating chart. Read and rewritten whole on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub furniture: Vec<FurnitureItem>,
    pub assignments: Assignments,
    pub grid_size: f64,
    pub template: Template,
    pub template_columns: u32,
    pub roster_mode: RosterMode,
    /// Custom roster text, one name per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            furniture: Vec::new(),
            assignments: Assignments::new(),
            grid_size: DEFAULT_GRID_SIZE,
            template: Template::default(),
            template_columns: DEFAULT_TEMPLATE_COLUMNS,
            roster_mode: RosterMode::default(),
            names: None,
        }
    }
}

impl Configuration {
    /// Decode a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, SeatingError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode the configuration as JSON.
    pub fn to_json(&self) -> Result<String, SeatingError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check the structural invariants: positive grid, grid-aligned items,
    /// and no assignment pointing at missing furniture.
    pub fn validate(&self) -> Result<(), SeatingError> {
        if self.grid_size <= 0.0 || !self.grid_size.is_finite() {
            return Err(SeatingError::InvalidGridSize(self.grid_size));
        }
        if let Some(item) = self.furniture.iter().find(|f| !f.is_grid_aligned(self.grid_size)) {
            return Err(SeatingError::OffGrid { id: item.id, grid_size: self.grid_size });
        }
        let ids = self.furniture_ids();
        if let Some((student, id)) = self.assignments.iter().find(|(_, id)| !ids.contains(*id)) {
            return Err(SeatingError::DanglingAssignment { student: student.clone(), furniture: *id });
        }
        Ok(())
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &FurnitureId) -> Option<&FurnitureItem> {
        self.furniture.iter().find(|f| f.id == *id)
    }

    fn furniture_ids(&self) -> HashSet<FurnitureId> {
        self.furniture.iter().map(|f| f.id).collect()
    }

    /// Furniture referenced by at least one assignment, in furniture order.
    #[must_use]
    pub fn occupied_ids(&self) -> Vec<FurnitureId> {
        let referenced: HashSet<&FurnitureId> = self.assignments.values().collect();
        self.furniture
            .iter()
            .filter(|f| referenced.contains(&f.id))
            .map(|f| f.id)
            .collect()
    }

    /// Names of the students seated at `id`, in name order.
    #[must_use]
    pub fn students_at(&self, id: &FurnitureId) -> Vec<String> {
        self.assignments
            .iter()
            .filter(|(_, fid)| *fid == id)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Apply a sparse update, snapping position and size to the grid.
    /// Returns false if the item doesn't exist.
    pub fn apply_update(&mut self, id: &FurnitureId, update: &FurnitureUpdate) -> bool {
        let grid = self.grid_size;
        let Some(item) = self.furniture.iter_mut().find(|f| f.id == *id) else {
            return false;
        };
        if let Some(x) = update.x {
            item.x = snap_to_grid(x, grid);
        }
        if let Some(y) = update.y {
            item.y = snap_to_grid(y, grid);
        }
        if let Some(w) = update.width {
            item.width = snap_size(w, grid);
        }
        if let Some(h) = update.height {
            item.height = snap_size(h, grid);
        }
        if let Some(r) = update.rotation {
            item.rotation = r.rem_euclid(360.0);
        }
        true
    }

    /// Remove an item and every assignment that pointed at it.
    /// Returns the removed item, if it was present.
    pub fn remove_furniture(&mut self, id: &FurnitureId) -> Option<FurnitureItem> {
        let pos = self.furniture.iter().position(|f| f.id == *id)?;
        let removed = self.furniture.remove(pos);
        self.assignments.retain(|_, fid| fid != id);
        Some(removed)
    }

    /// Drop assignments that reference missing furniture. Returns how many were removed.
    pub fn prune_dangling(&mut self) -> usize {
        let ids = self.furniture_ids();
        let before = self.assignments.len();
        self.assignments.retain(|_, fid| ids.contains(&*fid));
        before - self.assignments.len()
    }
}
