//! Entity records.
//!
//! Records are passive: they hold identity and descriptive fields only.
//! Membership (who is enrolled where, who teaches what) lives in the
//! registrar's relations so the two directions can't drift apart.

use serde::{Deserialize, Serialize};

use crate::id::{CourseId, StudentId, TeacherId};

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    id: StudentId,
    name: String,
}

impl Student {
    /// Create a student record.
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Student ID.
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A course offering with a seat limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    name: String,
    /// Maximum number of simultaneous enrollments. Zero means always full.
    capacity: u32,
}

impl Course {
    /// Create a course record.
    pub fn new(id: CourseId, name: impl Into<String>, capacity: u32) -> Self {
        Self { id, name: name.into(), capacity }
    }

    /// Course ID.
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seat limit.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Whether `enrolled` students fill every seat.
    pub fn is_full_at(&self, enrolled: usize) -> bool {
        enrolled >= self.capacity as usize
    }
}

/// A teacher who can be assigned to courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    id: TeacherId,
    name: String,
}

impl Teacher {
    /// Create a teacher record.
    pub fn new(id: TeacherId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Teacher ID.
    pub fn id(&self) -> &TeacherId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
