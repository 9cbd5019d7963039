//! Registrar error types.

use thiserror::Error;

use crate::id::{CourseId, EntityKind, StudentId, TeacherId};

/// Errors from registrar commands and queries.
///
/// Everything except [`RegistrarError::Store`] and
/// [`RegistrarError::Poisoned`] is an expected outcome of normal use. A
/// failed command never leaves partial state behind.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// An entity with this ID already exists.
    #[error("{kind} already exists: {id}")]
    DuplicateId {
        /// Kind of entity being created.
        kind: EntityKind,
        /// The conflicting ID.
        id: String,
    },

    /// No entity with this ID exists.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of entity looked up.
        kind: EntityKind,
        /// The missing ID.
        id: String,
    },

    /// The student is already on the course roster.
    #[error("student {student} is already enrolled in {course}")]
    AlreadyEnrolled {
        /// Student ID.
        student: StudentId,
        /// Course ID.
        course: CourseId,
    },

    /// The student is not on the course roster.
    #[error("student {student} is not enrolled in {course}")]
    NotEnrolled {
        /// Student ID.
        student: StudentId,
        /// Course ID.
        course: CourseId,
    },

    /// Every seat in the course is taken.
    #[error("course {course} is full (capacity {capacity})")]
    CourseFull {
        /// Course ID.
        course: CourseId,
        /// Seat limit that was reached.
        capacity: u32,
    },

    /// The teacher is already assigned to the course.
    #[error("teacher {teacher} is already assigned to {course}")]
    AlreadyAssigned {
        /// Teacher ID.
        teacher: TeacherId,
        /// Course ID.
        course: CourseId,
    },

    /// The teacher is not assigned to the course.
    #[error("teacher {teacher} is not assigned to {course}")]
    NotAssigned {
        /// Teacher ID.
        teacher: TeacherId,
        /// Course ID.
        course: CourseId,
    },

    /// Persistence collaborator failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A shared registrar's lock was poisoned by a panicking holder.
    #[error("registrar lock poisoned")]
    Poisoned,
}

impl RegistrarError {
    pub(crate) fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }

    pub(crate) fn duplicate(kind: EntityKind, id: impl ToString) -> Self {
        Self::DuplicateId { kind, id: id.to_string() }
    }

    /// Returns true if this error is fatal (not an expected outcome).
    ///
    /// Expected outcomes are rule rejections the caller can act on.
    /// Fatal errors come from collaborators outside the registry.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Store(_) | Self::Poisoned => true,

            Self::DuplicateId { .. }
            | Self::NotFound { .. }
            | Self::AlreadyEnrolled { .. }
            | Self::NotEnrolled { .. }
            | Self::CourseFull { .. }
            | Self::AlreadyAssigned { .. }
            | Self::NotAssigned { .. } => false,
        }
    }
}

/// Errors from persistence backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// Stored bytes are not a valid snapshot.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Broken internal invariant. Always a registrar bug, never returned by a
/// command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A pair is present in one direction of a relation only.
    #[error("asymmetric {relation} pair ({left}, {right})")]
    Asymmetric {
        /// Relation name.
        relation: &'static str,
        /// Left endpoint.
        left: String,
        /// Right endpoint.
        right: String,
    },

    /// A pair is recorded twice.
    #[error("duplicate {relation} pair ({left}, {right})")]
    DuplicatePair {
        /// Relation name.
        relation: &'static str,
        /// Left endpoint.
        left: String,
        /// Right endpoint.
        right: String,
    },

    /// A relation endpoint has no matching entity.
    #[error("{relation} references missing {kind} {id}")]
    DanglingReference {
        /// Relation name.
        relation: &'static str,
        /// Kind of the missing entity.
        kind: EntityKind,
        /// The missing ID.
        id: String,
    },

    /// A course has more students than seats.
    #[error("course {course} has {enrolled} students for {capacity} seats")]
    OverCapacity {
        /// Course ID.
        course: CourseId,
        /// Current roster size.
        enrolled: usize,
        /// Seat limit.
        capacity: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_rejections_are_not_fatal() {
        let err = RegistrarError::CourseFull { course: "CS101".into(), capacity: 2 };
        assert!(!err.is_fatal());

        let err = RegistrarError::not_found(EntityKind::Student, "S404");
        assert!(!err.is_fatal());
    }

    #[test]
    fn store_failures_are_fatal() {
        let err = RegistrarError::from(StoreError::Decode("truncated".to_string()));
        assert!(err.is_fatal());
        assert!(RegistrarError::Poisoned.is_fatal());
    }

    #[test]
    fn error_display() {
        let err = RegistrarError::duplicate(EntityKind::Course, "CS101");
        assert_eq!(err.to_string(), "course already exists: CS101");

        let err = RegistrarError::AlreadyEnrolled { student: "S001".into(), course: "CS101".into() };
        assert_eq!(err.to_string(), "student S001 is already enrolled in CS101");
    }
}
