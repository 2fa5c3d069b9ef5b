//! Seating chart engine for the classroom dashboard.
//!
//! The crate owns everything between raw user input and the persisted
//! seating configuration: placing furniture on a grid-snapped canvas,
//! generating bulk layouts, binding students to seats, and running the
//! randomized "who's next" picker. The host layer is responsible only for
//! wiring input events to the engine and carrying out the resulting
//! [`engine::Action`]s (store writes, toasts, timers, repaints).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`]: modes, gestures, CRUD, assignment, picker |
//! | [`doc`] | Furniture, assignments and the persisted [`doc::Configuration`] |
//! | [`layout`] | Pure layout generators (columns, horseshoe, pods, grouped) |
//! | [`input`] | Modes, points, canvas geometry and the gesture state machine |
//! | [`picker`] | Tick-driven random pick animation |
//! | [`roster`] | Resolving the active student list |
//! | [`host`] | Collaborator traits and action dispatch |
//! | [`timer`] | Tokio-backed recurring timer scheduler |
//! | [`config`] | Engine tuning loaded from the environment |
//! | [`error`] | Error type for fallible boundaries |
//! | [`consts`] | Shared numeric constants (sizes, margins, limits) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod layout;
pub mod picker;
pub mod roster;
pub mod timer;
