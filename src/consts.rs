//! Shared numeric constants for the seating crate.

// ── Grid ────────────────────────────────────────────────────────

/// Grid unit used when a configuration does not specify one.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Column count used by the rows template when none is configured.
pub const DEFAULT_TEMPLATE_COLUMNS: u32 = 6;

// ── Furniture ───────────────────────────────────────────────────

/// Unsnapped desk footprint; generators snap it to the active grid.
pub const DESK_W: f64 = 80.0;
pub const DESK_H: f64 = 65.0;

/// Rotation increment applied by a single rotate action, in degrees.
pub const ROTATE_STEP_DEG: f64 = 45.0;

/// Upper bound on items created by one bulk add.
pub const BULK_ADD_MAX: usize = 50;

// ── Canvas ──────────────────────────────────────────────────────

/// Minimum canvas dimension handed to generators, so spacing math never divides by zero.
pub const MIN_CANVAS_DIM: f64 = 200.0;

/// Width of the setup sidebar subtracted from the viewport when no canvas size is reported.
pub const SETUP_SIDEBAR_W: f64 = 192.0;

/// Height of the toolbar subtracted from the viewport when no canvas size is reported.
pub const TOOLBAR_H: f64 = 48.0;

/// Default widget viewport.
pub const DEFAULT_VIEWPORT_W: f64 = 600.0;
pub const DEFAULT_VIEWPORT_H: f64 = 500.0;

// ── Layout margins ──────────────────────────────────────────────

pub const ROWS_MARGIN: f64 = 40.0;

pub const PODS_MARGIN: f64 = 30.0;
/// Extra top offset so pods don't crowd the top edge.
pub const PODS_HEADER_OFFSET: f64 = 40.0;
pub const POD_GAP_INNER: f64 = 10.0;
pub const POD_GAP_OUTER: f64 = 40.0;

pub const HORSESHOE_EDGE: f64 = 20.0;
/// Space reserved above the arms at the front of the room.
pub const HORSESHOE_TOP_SPACE: f64 = 60.0;
/// Edge-to-edge gap between neighbouring desks.
pub const HORSESHOE_GAP: f64 = 14.0;
/// Gap between the outer and inner U.
pub const HORSESHOE_BETWEEN: f64 = 24.0;
pub const HORSESHOE_OUTER_ARM: usize = 4;
pub const HORSESHOE_OUTER_BOTTOM: usize = 6;
pub const HORSESHOE_INNER_ARM: usize = 3;
pub const HORSESHOE_INNER_BOTTOM: usize = 3;

// ── Picker ──────────────────────────────────────────────────────

pub const PICKER_TICK_MS: u64 = 100;
/// Total ticks of one pick animation; the last tick commits the winner.
pub const PICKER_TICKS: u32 = 16;
