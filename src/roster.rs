//! Resolving the active list of student display names.
//!
//! The engine treats the roster as read-only input. It comes either from the
//! host's active class roster or from free text typed into the widget.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::doc::{Assignments, RosterMode};

/// A student record from the host's class roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
}

impl Student {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), last_name: last_name.into() }
    }

    /// `"First Last"`, trimmed so a missing part leaves no stray space.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Display names for a class roster, in roster order.
#[must_use]
pub fn class_names(students: &[Student]) -> Vec<String> {
    students.iter().map(Student::display_name).collect()
}

/// Parse a custom roster: one name per line, trimmed, blanks dropped.
#[must_use]
pub fn parse_custom(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// The roster selected by `mode`.
#[must_use]
pub fn resolve_students(mode: RosterMode, class_roster: &[String], custom_text: Option<&str>) -> Vec<String> {
    match mode {
        RosterMode::Class => class_roster.to_vec(),
        RosterMode::Custom => custom_text.map(parse_custom).unwrap_or_default(),
    }
}

/// Roster names with no assignment, in roster order.
#[must_use]
pub fn unassigned(students: &[String], assignments: &Assignments) -> Vec<String> {
    let assigned: HashSet<&str> = assignments.keys().map(String::as_str).collect();
    students
        .iter()
        .filter(|s| !assigned.contains(s.as_str()))
        .cloned()
        .collect()
}
