//! Interaction engine: modes, selection, gestures, furniture CRUD, assignment, and the picker.
//!
//! `EngineCore` holds the last configuration the host's store emitted plus
//! engine-local state (mode, selection, in-progress gesture, picker run).
//! Every entry point runs to completion and returns the [`Action`]s the host
//! must carry out. A persisted change is always exactly one
//! [`Action::ConfigChanged`] carrying the whole next configuration, applied
//! locally first so queries see it immediately; the store echoing it back
//! through [`EngineCore::load_config`] is harmless.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::consts::{DEFAULT_VIEWPORT_H, DEFAULT_VIEWPORT_W, ROTATE_STEP_DEG, SETUP_SIDEBAR_W, TOOLBAR_H};
use crate::doc::{Configuration, FurnitureId, FurnitureItem, FurnitureKind, FurnitureUpdate, RosterMode, Template, snap_to_grid};
use crate::error::SeatingError;
use crate::host::Severity;
use crate::input::{CanvasGeometry, DragPreview, Gesture, Mode, MoveGesture, Point, ResizeGesture, ResizePreview, UiState};
use crate::layout::{self, LayoutArea, StudentGroup};
use crate::picker::{PickStep, PickerRun, TimerId};
use crate::roster;

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Persist this configuration (the whole structure).
    ConfigChanged(Configuration),
    /// Show a user-facing message.
    Notify { message: String, severity: Severity },
    /// Start a recurring timer; its ticks go to [`EngineCore::on_timer_tick`].
    StartTimer { id: TimerId, interval: Duration },
    /// Stop a timer previously started.
    CancelTimer { id: TimerId },
    /// Derived view state changed (selection, preview, highlight).
    RenderNeeded,
}

fn notify(message: impl Into<String>, severity: Severity) -> Action {
    Action::Notify { message: message.into(), severity }
}

/// Outcome of a bulk random assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssignReport {
    /// Students newly seated.
    pub assigned: usize,
    /// Unassigned students left without a seat.
    pub remaining: usize,
}

/// Core engine state, independent of any rendering surface.
pub struct EngineCore {
    config: Configuration,
    ui: UiState,
    gesture: Gesture,
    settings: EngineConfig,
    canvas: Option<CanvasGeometry>,
    viewport: (f64, f64),
    class_roster: Vec<String>,
    picker: Option<PickerRun>,
    highlight: Option<FurnitureId>,
    next_timer: u64,
    rng: StdRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_parts(EngineConfig::default(), StdRng::from_os_rng())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit tuning.
    #[must_use]
    pub fn with_settings(settings: EngineConfig) -> Self {
        Self::with_parts(settings, StdRng::from_os_rng())
    }

    /// Engine whose shuffles and picks are reproducible.
    #[must_use]
    pub fn with_seed(settings: EngineConfig, seed: u64) -> Self {
        Self::with_parts(settings, StdRng::seed_from_u64(seed))
    }

    fn with_parts(settings: EngineConfig, rng: StdRng) -> Self {
        Self {
            config: Configuration::default(),
            ui: UiState::default(),
            gesture: Gesture::Idle,
            settings,
            canvas: None,
            viewport: (DEFAULT_VIEWPORT_W, DEFAULT_VIEWPORT_H),
            class_roster: Vec::new(),
            picker: None,
            highlight: None,
            next_timer: 0,
            rng,
        }
    }

    // --- Data inputs ---

    /// Hydrate from the store. Assignments pointing at missing furniture are dropped.
    ///
    /// Returns a `CancelTimer` when the new configuration leaves a running pick
    /// with nothing to choose from.
    pub fn load_config(&mut self, mut config: Configuration) -> Result<Vec<Action>, SeatingError> {
        if config.grid_size <= 0.0 || !config.grid_size.is_finite() {
            return Err(SeatingError::InvalidGridSize(config.grid_size));
        }
        let pruned = config.prune_dangling();
        if pruned > 0 {
            warn!(pruned, "dropped assignments referencing missing furniture");
        }
        self.config = config;

        if let Some(id) = self.ui.selected_id {
            if self.config.item(&id).is_none() {
                self.ui.selected_id = None;
            }
        }
        if let Some(id) = self.gesture_target() {
            if self.config.item(&id).is_none() {
                self.gesture = Gesture::Idle;
            }
        }
        Ok(self.sync_picker().into_iter().collect())
    }

    /// Replace the active class roster (display names, in order).
    pub fn set_class_roster(&mut self, names: Vec<String>) {
        self.class_roster = names;
    }

    /// Update the rendered canvas geometry.
    pub fn set_canvas(&mut self, geometry: CanvasGeometry) {
        self.canvas = Some(geometry);
    }

    /// Update the widget viewport, used when no canvas geometry is known.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    // --- Mode / selection ---

    /// Switch modes. Selections and any in-progress gesture are discarded.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        if self.ui.mode != mode {
            info!(from = %self.ui.mode, to = %mode, "mode changed");
        }
        self.ui.mode = mode;
        self.ui.clear_selection();
        self.gesture = Gesture::Idle;
        vec![Action::RenderNeeded]
    }

    /// Click on empty canvas.
    pub fn on_canvas_click(&mut self) -> Vec<Action> {
        self.ui.clear_selection();
        vec![Action::RenderNeeded]
    }

    /// Click on a furniture item: select it in setup, seat the selected student in assign.
    pub fn on_furniture_click(&mut self, id: &FurnitureId) -> Vec<Action> {
        if self.config.item(id).is_none() {
            return Vec::new();
        }
        match self.ui.mode {
            Mode::Setup => {
                self.ui.selected_id = Some(*id);
                vec![Action::RenderNeeded]
            }
            Mode::Assign => {
                let Some(student) = self.ui.selected_student.take() else {
                    return Vec::new();
                };
                if self.config.assignments.get(&student) == Some(id) {
                    return vec![Action::RenderNeeded];
                }
                let mut next = self.config.clone();
                next.assignments.insert(student.clone(), *id);
                debug!(%student, furniture = %id, "assigned by click");
                vec![self.commit(next), notify(format!("Assigned {student}"), Severity::Success), Action::RenderNeeded]
            }
            Mode::Interact => Vec::new(),
        }
    }

    /// Click on a roster entry in assign mode: select it, or deselect if already selected.
    pub fn on_student_click(&mut self, name: &str) -> Vec<Action> {
        let name = name.trim();
        if self.ui.mode != Mode::Assign || name.is_empty() {
            return Vec::new();
        }
        if self.ui.selected_student.as_deref() == Some(name) {
            self.ui.selected_student = None;
        } else {
            self.ui.selected_student = Some(name.to_string());
        }
        vec![Action::RenderNeeded]
    }

    // --- Furniture CRUD ---

    /// Add `count` items (clamped to 1..=bulk max) of `kind` around the canvas centre.
    ///
    /// Bulk items step one grid cell down and right from each other. A single
    /// new item becomes the selection.
    pub fn add_furniture(&mut self, kind: FurnitureKind, count: usize) -> Vec<Action> {
        let count = count.clamp(1, self.settings.bulk_max.max(1));
        let grid = self.config.grid_size;
        let (canvas_w, canvas_h) = self.canvas_size();

        let mut next = self.config.clone();
        let mut created = Vec::with_capacity(count);
        for i in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f64 * grid;
            let mut item = FurnitureItem::new(kind, 0.0, 0.0, grid);
            item.x = snap_to_grid(canvas_w / 2.0 - item.width / 2.0 + offset, grid);
            item.y = snap_to_grid(canvas_h / 2.0 - item.height / 2.0 + offset, grid);
            created.push(item.id);
            next.furniture.push(item);
        }
        if let [only] = created.as_slice() {
            self.ui.selected_id = Some(*only);
        }
        info!(%kind, label = kind.label(), count, "furniture added");
        vec![self.commit(next), Action::RenderNeeded]
    }

    /// Apply a sparse, grid-snapped update to one item.
    pub fn update_furniture(&mut self, id: &FurnitureId, update: &FurnitureUpdate) -> Vec<Action> {
        let mut next = self.config.clone();
        if !next.apply_update(id, update) || next == self.config {
            return Vec::new();
        }
        vec![self.commit(next)]
    }

    /// Rotate one step clockwise, wrapping at 360°.
    pub fn rotate(&mut self, id: &FurnitureId) -> Vec<Action> {
        self.rotate_by(id, ROTATE_STEP_DEG)
    }

    /// Rotate by an arbitrary number of degrees (negative turns counter-clockwise).
    pub fn rotate_by(&mut self, id: &FurnitureId, degrees: f64) -> Vec<Action> {
        let Some(item) = self.config.item(id) else {
            return Vec::new();
        };
        let rotation = (item.rotation + degrees).rem_euclid(360.0);
        self.update_furniture(id, &FurnitureUpdate { rotation: Some(rotation), ..Default::default() })
    }

    /// Clone an item one grid cell down and right, and select the copy.
    pub fn duplicate_furniture(&mut self, id: &FurnitureId) -> Vec<Action> {
        let Some(item) = self.config.item(id) else {
            return Vec::new();
        };
        let grid = self.config.grid_size;
        let copy = FurnitureItem {
            id: Uuid::new_v4(),
            x: snap_to_grid(item.x + grid, grid),
            y: snap_to_grid(item.y + grid, grid),
            ..item.clone()
        };
        self.ui.selected_id = Some(copy.id);
        let mut next = self.config.clone();
        next.furniture.push(copy);
        vec![self.commit(next), Action::RenderNeeded]
    }

    /// Delete an item together with every assignment that referenced it.
    pub fn delete_furniture(&mut self, id: &FurnitureId) -> Vec<Action> {
        let mut next = self.config.clone();
        let Some(removed) = next.remove_furniture(id) else {
            return Vec::new();
        };
        let unseated = self.config.assignments.len() - next.assignments.len();
        info!(id = %removed.id, kind = %removed.kind, unseated, "furniture deleted");
        if self.gesture_target() == Some(*id) {
            self.gesture = Gesture::Idle;
        }
        self.ui.selected_id = None;
        let mut actions = vec![self.commit(next)];
        actions.extend(self.sync_picker());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove all furniture and all assignments in one write.
    pub fn clear_all_furniture(&mut self) -> Vec<Action> {
        if self.config.furniture.is_empty() && self.config.assignments.is_empty() {
            return Vec::new();
        }
        let mut next = self.config.clone();
        next.furniture.clear();
        next.assignments.clear();
        self.ui.selected_id = None;
        self.gesture = Gesture::Idle;
        info!("all furniture cleared");
        let mut actions = vec![self.commit(next)];
        actions.extend(self.sync_picker());
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Gestures ---

    /// Pointer-down on an item body in setup mode: select it and start a move.
    pub fn on_pointer_down(&mut self, id: &FurnitureId, pt: Point) -> Vec<Action> {
        if self.ui.mode != Mode::Setup {
            return Vec::new();
        }
        let Some(item) = self.config.item(id) else {
            return Vec::new();
        };
        let (orig_x, orig_y) = (item.x, item.y);
        self.ui.selected_id = Some(*id);
        self.gesture = Gesture::Moving(MoveGesture {
            id: *id,
            orig_x,
            orig_y,
            start: pt,
            scale: self.gesture_scale(),
            current: DragPreview { id: *id, x: orig_x, y: orig_y },
        });
        debug!(%id, "move started");
        vec![Action::RenderNeeded]
    }

    /// Pointer-down on an item's resize handle in setup mode.
    pub fn on_resize_start(&mut self, id: &FurnitureId, pt: Point) -> Vec<Action> {
        if self.ui.mode != Mode::Setup {
            return Vec::new();
        }
        let Some(item) = self.config.item(id) else {
            return Vec::new();
        };
        let (orig_w, orig_h) = (item.width, item.height);
        self.gesture = Gesture::Resizing(ResizeGesture {
            id: *id,
            orig_w,
            orig_h,
            start: pt,
            scale: self.gesture_scale(),
            current: ResizePreview { id: *id, width: orig_w, height: orig_h },
        });
        debug!(%id, "resize started");
        vec![Action::RenderNeeded]
    }

    /// Pointer-move: update the transient preview only. Never writes.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let grid = self.config.grid_size;
        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Moving(g) => {
                g.update(pt, grid);
                vec![Action::RenderNeeded]
            }
            Gesture::Resizing(g) => {
                g.update(pt, grid);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Pointer-up: commit the gesture's final value in a single write.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let update = match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return Vec::new(),
            Gesture::Moving(g) => (g.id, FurnitureUpdate { x: Some(g.current.x), y: Some(g.current.y), ..Default::default() }),
            Gesture::Resizing(g) => (
                g.id,
                FurnitureUpdate { width: Some(g.current.width), height: Some(g.current.height), ..Default::default() },
            ),
        };
        let mut actions = self.update_furniture(&update.0, &update.1);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Abandon the current gesture without writing.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => Vec::new(),
            _ => vec![Action::RenderNeeded],
        }
    }

    // --- Assignment ---

    /// Drop a student onto an item in assign mode. Dropping onto their current seat is a no-op.
    pub fn on_student_drop(&mut self, name: &str, id: &FurnitureId) -> Vec<Action> {
        let name = name.trim();
        if self.ui.mode != Mode::Assign || name.is_empty() || self.config.item(id).is_none() {
            return Vec::new();
        }
        if self.config.assignments.get(name) == Some(id) {
            return Vec::new();
        }
        let mut next = self.config.clone();
        next.assignments.insert(name.to_string(), *id);
        debug!(student = %name, furniture = %id, "assigned by drop");
        vec![self.commit(next), Action::RenderNeeded]
    }

    /// Unseat one student.
    pub fn remove_assignment(&mut self, name: &str) -> Vec<Action> {
        if !self.config.assignments.contains_key(name) {
            return Vec::new();
        }
        let mut next = self.config.clone();
        next.assignments.remove(name);
        let mut actions = vec![self.commit(next)];
        actions.extend(self.sync_picker());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Unseat everyone, keeping the furniture.
    pub fn clear_assignments(&mut self) -> Vec<Action> {
        if self.config.assignments.is_empty() {
            return Vec::new();
        }
        let mut next = self.config.clone();
        next.assignments.clear();
        info!("all assignments cleared");
        let mut actions = vec![self.commit(next)];
        actions.extend(self.sync_picker());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Seat unassigned students at random on empty desks and tables.
    ///
    /// Students and seats are shuffled independently and paired until one
    /// list runs out. Everything lands in one write.
    pub fn assign_all_randomly(&mut self) -> (AssignReport, Vec<Action>) {
        let seatable: Vec<&FurnitureItem> = self.config.furniture.iter().filter(|f| f.kind.is_seatable()).collect();
        if seatable.is_empty() {
            return (AssignReport::default(), vec![notify("No desks or tables available!", Severity::Error)]);
        }

        let mut students = self.unassigned_students();
        if students.is_empty() {
            return (AssignReport::default(), vec![notify("All students are already assigned!", Severity::Info)]);
        }

        let occupied: HashSet<&FurnitureId> = self.config.assignments.values().collect();
        let mut spots: Vec<FurnitureId> = seatable.iter().filter(|f| !occupied.contains(&f.id)).map(|f| f.id).collect();
        if spots.is_empty() {
            let report = AssignReport { assigned: 0, remaining: students.len() };
            return (report, vec![notify("No empty spots available!", Severity::Error)]);
        }

        students.shuffle(&mut self.rng);
        spots.shuffle(&mut self.rng);

        let mut next = self.config.clone();
        let assigned = students.len().min(spots.len());
        for (student, spot) in students.iter().zip(spots.iter()) {
            next.assignments.insert(student.clone(), *spot);
        }
        let report = AssignReport { assigned, remaining: students.len() - assigned };
        info!(assigned = report.assigned, remaining = report.remaining, "random assignment");

        let message = if report.remaining > 0 {
            notify(
                format!("Assigned {} students. {} still need spots.", report.assigned, report.remaining),
                Severity::Info,
            )
        } else {
            notify(format!("Randomly assigned {} students!", report.assigned), Severity::Success)
        };
        (report, vec![self.commit(next), message, Action::RenderNeeded])
    }

    // --- Picker ---

    /// Start the random pick animation over occupied furniture.
    ///
    /// A pick already in flight is cancelled first. With nothing occupied the
    /// caller is notified and no timer starts.
    pub fn pick_random(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(run) = self.picker.take() {
            actions.push(Action::CancelTimer { id: run.timer() });
        }

        let occupied = self.config.occupied_ids();
        if occupied.is_empty() {
            actions.push(notify("No students assigned to seats!", Severity::Info));
            return actions;
        }

        self.next_timer += 1;
        let timer = TimerId(self.next_timer);
        let pool_size = occupied.len();
        if let Some(run) = PickerRun::new(timer, occupied, self.settings.picker_ticks) {
            self.picker = Some(run);
            info!(timer = timer.0, pool = pool_size, "random pick started");
            actions.push(Action::StartTimer { id: timer, interval: self.settings.picker_interval() });
        }
        actions
    }

    /// Advance the pick animation. Ticks from any timer but the current one are ignored.
    pub fn on_timer_tick(&mut self, timer: TimerId) -> Vec<Action> {
        let Some(run) = self.picker.as_mut() else {
            return Vec::new();
        };
        if run.timer() != timer {
            debug!(timer = timer.0, "stale timer tick ignored");
            return Vec::new();
        }
        match run.tick(&mut self.rng) {
            PickStep::Highlight(id) => {
                self.highlight = Some(id);
                vec![Action::RenderNeeded]
            }
            PickStep::Finished(id) => {
                self.highlight = Some(id);
                self.picker = None;
                info!(winner = %id, students = ?self.config.students_at(&id), "random pick finished");
                vec![Action::CancelTimer { id: timer }, Action::RenderNeeded]
            }
            PickStep::Exhausted => {
                self.picker = None;
                vec![Action::CancelTimer { id: timer }, Action::RenderNeeded]
            }
        }
    }

    /// Release everything time-based before the engine is dropped.
    pub fn teardown(&mut self) -> Vec<Action> {
        self.gesture = Gesture::Idle;
        match self.picker.take() {
            Some(run) => vec![Action::CancelTimer { id: run.timer() }],
            None => Vec::new(),
        }
    }

    // --- Templates ---

    /// Replace the furniture with the selected template and clear all assignments.
    pub fn apply_template(&mut self) -> Vec<Action> {
        let template = self.config.template;
        if template == Template::Freeform {
            return vec![notify("Pick a layout template to apply.", Severity::Info)];
        }
        let students = self.students().len();
        if students == 0 && template.needs_roster() {
            return vec![notify("No students found. Set a class or custom roster first.", Severity::Error)];
        }

        let (width, height) = self.canvas_size();
        let area = LayoutArea::new(width, height, self.config.grid_size);
        let columns = self.config.template_columns.max(1) as usize;
        let furniture = layout::generate(template, students, columns, &area);
        let desks = furniture.len();

        let mut next = self.config.clone();
        next.furniture = furniture;
        next.assignments.clear();
        self.ui.selected_id = None;
        self.gesture = Gesture::Idle;
        info!(%template, students, desks, width, height, "template applied");

        let mut actions = vec![self.commit(next)];
        actions.extend(self.sync_picker());
        actions.push(notify(format!("Applied {template} layout with {desks} desks."), Severity::Success));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Materialize externally formed groups: one desk per member, each member seated.
    pub fn apply_grouped(&mut self, groups: &[StudentGroup]) -> Vec<Action> {
        let (width, height) = self.canvas_size();
        let area = LayoutArea::new(width, height, self.config.grid_size);
        let generated = layout::grouped(groups, &area);
        if generated.furniture.is_empty() {
            return vec![notify("No groups to import.", Severity::Info)];
        }

        let group_count = groups.iter().filter(|g| g.names.iter().any(|n| !n.trim().is_empty())).count();
        let seated = generated.assignments.len();
        let mut next = self.config.clone();
        next.furniture = generated.furniture;
        next.assignments = generated.assignments;
        self.ui.selected_id = None;
        self.gesture = Gesture::Idle;
        info!(groups = group_count, seated, "groups imported");

        let mut actions = vec![self.commit(next)];
        actions.extend(self.sync_picker());
        actions.push(notify(format!("Imported {group_count} groups with {seated} students."), Severity::Success));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_template(&mut self, template: Template) -> Vec<Action> {
        if self.config.template == template {
            return Vec::new();
        }
        let mut next = self.config.clone();
        next.template = template;
        vec![self.commit(next)]
    }

    /// Set the rows template's column count (at least one).
    pub fn set_template_columns(&mut self, columns: u32) -> Vec<Action> {
        let columns = columns.max(1);
        if self.config.template_columns == columns {
            return Vec::new();
        }
        let mut next = self.config.clone();
        next.template_columns = columns;
        vec![self.commit(next)]
    }

    pub fn set_roster_mode(&mut self, mode: RosterMode) -> Vec<Action> {
        if self.config.roster_mode == mode {
            return Vec::new();
        }
        let mut next = self.config.clone();
        next.roster_mode = mode;
        vec![self.commit(next), Action::RenderNeeded]
    }

    /// Replace the custom roster text.
    pub fn set_custom_names(&mut self, text: &str) -> Vec<Action> {
        if self.config.names.as_deref() == Some(text) {
            return Vec::new();
        }
        let mut next = self.config.clone();
        next.names = Some(text.to_string());
        vec![self.commit(next), Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ui.mode
    }

    /// The currently selected furniture, if any.
    #[must_use]
    pub fn selection(&self) -> Option<FurnitureId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn selected_student(&self) -> Option<&str> {
        self.ui.selected_student.as_deref()
    }

    /// The last persisted configuration.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[must_use]
    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    /// Look up a persisted item by id.
    #[must_use]
    pub fn item(&self, id: &FurnitureId) -> Option<&FurnitureItem> {
        self.config.item(id)
    }

    /// Furniture as it should be drawn: persisted items with any gesture preview overlaid.
    #[must_use]
    pub fn furniture(&self) -> Vec<FurnitureItem> {
        let mut items = self.config.furniture.clone();
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Moving(g) => {
                if let Some(item) = items.iter_mut().find(|f| f.id == g.id) {
                    item.x = g.current.x;
                    item.y = g.current.y;
                }
            }
            Gesture::Resizing(g) => {
                if let Some(item) = items.iter_mut().find(|f| f.id == g.id) {
                    item.width = g.current.width;
                    item.height = g.current.height;
                }
            }
        }
        items
    }

    #[must_use]
    pub fn drag_preview(&self) -> Option<DragPreview> {
        match self.gesture {
            Gesture::Moving(g) => Some(g.current),
            _ => None,
        }
    }

    #[must_use]
    pub fn resize_preview(&self) -> Option<ResizePreview> {
        match self.gesture {
            Gesture::Resizing(g) => Some(g.current),
            _ => None,
        }
    }

    /// The active roster.
    #[must_use]
    pub fn students(&self) -> Vec<String> {
        roster::resolve_students(self.config.roster_mode, &self.class_roster, self.config.names.as_deref())
    }

    /// Roster names without a seat, in roster order.
    #[must_use]
    pub fn unassigned_students(&self) -> Vec<String> {
        roster::unassigned(&self.students(), &self.config.assignments)
    }

    /// Students seated at `id`.
    #[must_use]
    pub fn assigned_students(&self, id: &FurnitureId) -> Vec<String> {
        self.config.students_at(id)
    }

    /// Furniture currently highlighted by the picker.
    #[must_use]
    pub fn random_highlight(&self) -> Option<FurnitureId> {
        self.highlight
    }

    #[must_use]
    pub fn is_randomizing(&self) -> bool {
        self.picker.is_some()
    }

    /// Timer driving the current pick, if one is in flight.
    #[must_use]
    pub fn active_timer(&self) -> Option<TimerId> {
        self.picker.as_ref().map(PickerRun::timer)
    }

    // --- Internals ---

    fn commit(&mut self, next: Configuration) -> Action {
        self.config = next.clone();
        Action::ConfigChanged(next)
    }

    fn gesture_target(&self) -> Option<FurnitureId> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Moving(g) => Some(g.id),
            Gesture::Resizing(g) => Some(g.id),
        }
    }

    fn gesture_scale(&self) -> f64 {
        self.canvas.map_or(1.0, |c| c.effective_scale())
    }

    /// Usable canvas size for generators and placement, floored at the minimum dimension.
    fn canvas_size(&self) -> (f64, f64) {
        let (w, h) = match self.canvas {
            Some(c) => (c.width, c.height),
            None => (self.viewport.0 - SETUP_SIDEBAR_W, self.viewport.1 - TOOLBAR_H),
        };
        let min = self.settings.min_canvas_dim;
        (w.max(min), h.max(min))
    }

    /// Keep the picker pool in step with what is still occupied; stop it if nothing is.
    fn sync_picker(&mut self) -> Option<Action> {
        if self.highlight.is_some_and(|id| self.config.item(&id).is_none()) {
            self.highlight = None;
        }
        let run = self.picker.as_mut()?;
        let occupied: HashSet<FurnitureId> = self.config.occupied_ids().into_iter().collect();
        run.retain(|id| occupied.contains(id));
        if run.pool().is_empty() {
            let timer = run.timer();
            self.picker = None;
            return Some(Action::CancelTimer { id: timer });
        }
        None
    }
}
