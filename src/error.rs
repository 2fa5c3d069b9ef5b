//! Errors raised at the crate's fallible boundaries.
//!
//! Engine operations themselves never fail: refusals surface as
//! notifications. These errors cover parsing host input and validating
//! configurations handed to the engine.

use crate::doc::FurnitureId;

#[derive(Debug, thiserror::Error)]
pub enum SeatingError {
    #[error("unknown furniture type: {0}")]
    UnknownFurnitureKind(String),
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    #[error("unknown roster mode: {0}")]
    UnknownRosterMode(String),
    #[error("grid size must be positive, got {0}")]
    InvalidGridSize(f64),
    #[error("furniture {id} is off the {grid_size} grid")]
    OffGrid { id: FurnitureId, grid_size: f64 },
    #[error("assignment for {student} references missing furniture {furniture}")]
    DanglingAssignment { student: String, furniture: FurnitureId },
    #[error("invalid configuration JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
