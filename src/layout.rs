//! Layout generators: pure functions from a head count and canvas area to desks.
//!
//! Every generator emits `desk` items with fresh ids, positions snapped to the
//! grid, and a final clamp that keeps items inside the canvas. The desk
//! footprint is the default desk size snapped to the active grid, so sizes
//! honour the grid as well.
//!
//! Horseshoe is the odd one out: it always emits the same 23-desk topology
//! regardless of roster size; unneeded desks are deleted by hand afterwards.
//!
//! Grouped is the only generator that also returns assignments, since its job
//! is to materialize an external grouping directly into seats.

#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    DEFAULT_GRID_SIZE, DESK_H, DESK_W, HORSESHOE_BETWEEN, HORSESHOE_EDGE, HORSESHOE_GAP, HORSESHOE_INNER_ARM,
    HORSESHOE_INNER_BOTTOM, HORSESHOE_OUTER_ARM, HORSESHOE_OUTER_BOTTOM, HORSESHOE_TOP_SPACE, POD_GAP_INNER,
    POD_GAP_OUTER, PODS_HEADER_OFFSET, PODS_MARGIN, ROWS_MARGIN,
};
use crate::doc::{Assignments, FurnitureItem, FurnitureKind, Template, snap_size, snap_to_grid};

/// Canvas dimensions and grid unit handed to a generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutArea {
    pub width: f64,
    pub height: f64,
    pub grid_size: f64,
}

impl LayoutArea {
    #[must_use]
    pub fn new(width: f64, height: f64, grid_size: f64) -> Self {
        Self { width, height, grid_size }
    }

    /// Grid unit, falling back to the default when the configured one is unusable.
    fn grid(&self) -> f64 {
        if self.grid_size > 0.0 && self.grid_size.is_finite() {
            self.grid_size
        } else {
            DEFAULT_GRID_SIZE
        }
    }

    /// Snapped `(width, height)` of a generated desk.
    #[must_use]
    pub fn desk_footprint(&self) -> (f64, f64) {
        let grid = self.grid();
        (snap_size(DESK_W, grid), snap_size(DESK_H, grid))
    }

    /// Snap a coordinate and keep an item of `size` inside `extent`.
    fn place(&self, pos: f64, size: f64, extent: f64) -> f64 {
        let grid = self.grid();
        let max = ((extent - size) / grid).floor() * grid;
        snap_to_grid(pos, grid).min(max).max(0.0)
    }

    /// Desk-row tops for bands stacked down the canvas from `top`.
    ///
    /// `bands[b]` is the number of desk rows in band `b`. Rows inside a band
    /// sit `POD_GAP_INNER` apart and bands sit `POD_GAP_OUTER` apart. When that
    /// stack would cross `bottom`, every row moves onto one even grid-aligned
    /// pitch of at least one cell instead, so rows overlap rather than pile
    /// onto the bottom edge.
    fn stack_bands(&self, top: f64, bands: &[usize], bottom: f64) -> Vec<Vec<f64>> {
        let (_, desk_h) = self.desk_footprint();
        let grid = self.grid();

        let mut tops = Vec::with_capacity(bands.len());
        let mut y = top;
        for &rows in bands {
            tops.push((0..rows).map(|j| y + j as f64 * (desk_h + POD_GAP_INNER)).collect::<Vec<f64>>());
            y += rows as f64 * desk_h + rows.saturating_sub(1) as f64 * POD_GAP_INNER + POD_GAP_OUTER;
        }

        let total: usize = bands.iter().sum();
        let last = tops.iter().flatten().next_back().copied();
        if total < 2 || last.is_none_or(|t| t + desk_h <= bottom) {
            return tops;
        }

        let start = snap_to_grid(top, grid);
        let pitch = ((bottom - desk_h - start) / (total - 1) as f64 / grid).floor() * grid;
        let pitch = pitch.max(grid);
        let mut next = 0_usize;
        for band in &mut tops {
            for t in band.iter_mut() {
                *t = start + next as f64 * pitch;
                next += 1;
            }
        }
        tops
    }

    fn desk(&self, x: f64, y: f64, rotation: f64) -> FurnitureItem {
        let (w, h) = self.desk_footprint();
        FurnitureItem {
            id: Uuid::new_v4(),
            kind: FurnitureKind::Desk,
            x: self.place(x, w, self.width),
            y: self.place(y, h, self.height),
            width: w,
            height: h,
            rotation,
        }
    }
}

/// A named group of students supplied by an external grouping tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentGroup {
    #[serde(default)]
    pub label: String,
    pub names: Vec<String>,
}

/// Desks plus the seat for every grouped student.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedLayout {
    pub furniture: Vec<FurnitureItem>,
    pub assignments: Assignments,
}

/// Dispatch to the generator for `template`. Freeform has no generator.
#[must_use]
pub fn generate(template: Template, count: usize, columns: usize, area: &LayoutArea) -> Vec<FurnitureItem> {
    match template {
        Template::Freeform => Vec::new(),
        Template::Rows => self::columns(count, columns, area),
        Template::Horseshoe => horseshoe(count, area),
        Template::Pods => pods(count, area),
    }
}

// =============================================================
// Columns
// =============================================================

/// Lay `count` desks out in `columns` vertical columns.
///
/// Each column holds up to `ceil(count / columns)` desks spread evenly over
/// the available height; the last column may be short. A lone column or a
/// single desk per column is centred on that axis.
#[must_use]
pub fn columns(count: usize, columns: usize, area: &LayoutArea) -> Vec<FurnitureItem> {
    if count == 0 || columns == 0 {
        return Vec::new();
    }
    let (desk_w, desk_h) = area.desk_footprint();
    let per_column = count.div_ceil(columns);
    let actual_columns = columns.min(count.div_ceil(per_column));

    let avail_w = area.width - ROWS_MARGIN * 2.0;
    let avail_h = area.height - ROWS_MARGIN * 2.0;
    let col_spacing = if actual_columns > 1 { (avail_w - desk_w) / (actual_columns - 1) as f64 } else { 0.0 };
    let row_spacing = if per_column > 1 { (avail_h - desk_h) / (per_column - 1) as f64 } else { 0.0 };

    let mut items = Vec::with_capacity(count);
    for col in 0..actual_columns {
        let x = if actual_columns == 1 {
            area.width / 2.0 - desk_w / 2.0
        } else {
            ROWS_MARGIN + col as f64 * col_spacing
        };
        for row in 0..per_column {
            if items.len() == count {
                break;
            }
            let y = if per_column == 1 {
                area.height / 2.0 - desk_h / 2.0
            } else {
                ROWS_MARGIN + row as f64 * row_spacing
            };
            items.push(area.desk(x, y, 0.0));
        }
    }
    items
}

// =============================================================
// Horseshoe
// =============================================================

/// Place `n` rotated desks down a vertical arm.
///
/// Arithmetic is in visual space: a desk rotated a quarter turn about its
/// centre shows `height × width`, and its visual top-left sits half the size
/// difference away from its unrotated top-left.
fn place_arm(items: &mut Vec<FurnitureItem>, area: &LayoutArea, n: usize, v_left: f64, v_top: f64, v_bottom: f64, rotation: f64) {
    let (desk_w, desk_h) = area.desk_footprint();
    let rot_half = (desk_w - desk_h) / 2.0;
    let vis_h = desk_w;
    let span = v_bottom - v_top;
    let step = if n > 1 { (span - vis_h) / (n - 1) as f64 } else { 0.0 };
    for i in 0..n {
        let vt = if n == 1 { v_top + (span - vis_h) / 2.0 } else { v_top + i as f64 * step };
        items.push(area.desk(v_left - rot_half, vt + rot_half, rotation));
    }
}

/// Place `n` unrotated desks along a row from `x_first` to `x_last`.
fn place_row(items: &mut Vec<FurnitureItem>, area: &LayoutArea, n: usize, v_top: f64, x_first: f64, x_last: f64) {
    let step = if n > 1 { (x_last - x_first) / (n - 1) as f64 } else { 0.0 };
    for i in 0..n {
        let x = if n == 1 { (x_first + x_last) / 2.0 } else { x_first + i as f64 * step };
        items.push(area.desk(x, v_top, 0.0));
    }
}

/// Outer and inner U of desks opening upward toward the front of the room.
///
/// The head count is ignored: the topology is fixed.
#[must_use]
pub fn horseshoe(_count: usize, area: &LayoutArea) -> Vec<FurnitureItem> {
    let (desk_w, desk_h) = area.desk_footprint();
    let vis_w = desk_h;
    let mut items = Vec::with_capacity(horseshoe_size());

    // Outer U
    let outer_left = HORSESHOE_EDGE;
    let outer_right = area.width - HORSESHOE_EDGE - vis_w;
    let outer_row_top = area.height - HORSESHOE_EDGE - desk_h;
    let arm_top = HORSESHOE_EDGE + HORSESHOE_TOP_SPACE;
    let outer_arm_bottom = outer_row_top - HORSESHOE_GAP;

    place_arm(&mut items, area, HORSESHOE_OUTER_ARM, outer_left, arm_top, outer_arm_bottom, 90.0);
    place_arm(&mut items, area, HORSESHOE_OUTER_ARM, outer_right, arm_top, outer_arm_bottom, 270.0);
    place_row(
        &mut items,
        area,
        HORSESHOE_OUTER_BOTTOM,
        outer_row_top,
        outer_left + vis_w + HORSESHOE_GAP,
        outer_right - HORSESHOE_GAP - desk_w,
    );

    // Inner U
    let inner_left = outer_left + vis_w + HORSESHOE_BETWEEN;
    let inner_right = outer_right - vis_w - HORSESHOE_BETWEEN;
    let inner_row_top = outer_row_top - desk_h - HORSESHOE_BETWEEN;
    let inner_arm_bottom = inner_row_top - HORSESHOE_GAP;

    place_arm(&mut items, area, HORSESHOE_INNER_ARM, inner_left, arm_top, inner_arm_bottom, 90.0);
    place_arm(&mut items, area, HORSESHOE_INNER_ARM, inner_right, arm_top, inner_arm_bottom, 270.0);
    place_row(
        &mut items,
        area,
        HORSESHOE_INNER_BOTTOM,
        inner_row_top,
        inner_left + vis_w + HORSESHOE_GAP,
        inner_right - HORSESHOE_GAP - desk_w,
    );

    items
}

/// Number of desks every horseshoe layout contains.
#[must_use]
pub const fn horseshoe_size() -> usize {
    2 * HORSESHOE_OUTER_ARM + HORSESHOE_OUTER_BOTTOM + 2 * HORSESHOE_INNER_ARM + HORSESHOE_INNER_BOTTOM
}

// =============================================================
// Pods
// =============================================================

/// Clusters of four desks (2×2), the last pod holding the remainder.
///
/// Pods are tiled left to right and top to bottom. Rows of pods that would
/// run off the bottom of the canvas are squeezed together instead.
#[must_use]
pub fn pods(count: usize, area: &LayoutArea) -> Vec<FurnitureItem> {
    if count == 0 {
        return Vec::new();
    }
    let (desk_w, _) = area.desk_footprint();
    let num_pods = count.div_ceil(4);
    let pod_w = desk_w * 2.0 + POD_GAP_INNER;

    let avail_w = area.width - PODS_MARGIN * 2.0;
    let per_row_raw = ((avail_w + POD_GAP_OUTER) / (pod_w + POD_GAP_OUTER)).floor();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pods_per_row = if per_row_raw >= 1.0 { per_row_raw as usize } else { 1 };

    let grid_w = pods_per_row as f64 * pod_w + (pods_per_row - 1) as f64 * POD_GAP_OUTER;
    let start_x = PODS_MARGIN.max((area.width - grid_w) / 2.0);
    let start_y = PODS_MARGIN + PODS_HEADER_OFFSET;
    let pod_rows = num_pods.div_ceil(pods_per_row);
    let tops = area.stack_bands(start_y, &vec![2; pod_rows], area.height - PODS_MARGIN);

    // x offset and desk row within the pod: top-left, top-right, bottom-left, bottom-right
    let offsets = [(0.0, 0), (desk_w + POD_GAP_INNER, 0), (0.0, 1), (desk_w + POD_GAP_INNER, 1)];

    let mut items = Vec::with_capacity(count);
    for pod in 0..num_pods {
        let Some(rows) = tops.get(pod / pods_per_row) else {
            continue;
        };
        let pod_x = start_x + (pod % pods_per_row) as f64 * (pod_w + POD_GAP_OUTER);
        let desks = (count - pod * 4).min(4);
        for &(dx, row) in offsets.iter().take(desks) {
            if let Some(&y) = rows.get(row) {
                items.push(area.desk(pod_x + dx, y, 0.0));
            }
        }
    }
    items
}

// =============================================================
// Grouped
// =============================================================

/// One desk per group member, each group clustered two desks wide.
///
/// Clusters are tiled left to right and wrap when the next one would cross
/// the right margin; bands that would run off the bottom are squeezed
/// together. Blank names are skipped; a name listed in more than one group
/// keeps its last desk.
#[must_use]
pub fn grouped(groups: &[StudentGroup], area: &LayoutArea) -> GroupedLayout {
    let (desk_w, _) = area.desk_footprint();
    let cluster_w = desk_w * 2.0 + POD_GAP_INNER;
    let right_edge = area.width - PODS_MARGIN;

    // (left edge, band, names) per cluster, plus desk rows per band
    let mut clusters: Vec<(f64, usize, Vec<&str>)> = Vec::with_capacity(groups.len());
    let mut bands: Vec<usize> = Vec::new();
    let mut cursor_x = PODS_MARGIN;

    for group in groups {
        let names: Vec<&str> = group.names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).collect();
        if names.is_empty() {
            continue;
        }
        if bands.is_empty() || (cursor_x > PODS_MARGIN && cursor_x + cluster_w > right_edge) {
            cursor_x = PODS_MARGIN;
            bands.push(0);
        }
        let band = bands.len() - 1;
        if let Some(rows) = bands.last_mut() {
            *rows = (*rows).max(names.len().div_ceil(2));
        }
        clusters.push((cursor_x, band, names));
        cursor_x += cluster_w + POD_GAP_OUTER;
    }

    let tops = area.stack_bands(PODS_MARGIN + PODS_HEADER_OFFSET, &bands, area.height - PODS_MARGIN);

    let mut layout = GroupedLayout::default();
    for (left, band, names) in clusters {
        let Some(rows) = tops.get(band) else {
            continue;
        };
        for (k, name) in names.iter().enumerate() {
            let Some(&y) = rows.get(k / 2) else {
                continue;
            };
            let dx = (k % 2) as f64 * (desk_w + POD_GAP_INNER);
            let desk = area.desk(left + dx, y, 0.0);
            layout.assignments.insert((*name).to_string(), desk.id);
            layout.furniture.push(desk);
        }
    }
    layout
}
