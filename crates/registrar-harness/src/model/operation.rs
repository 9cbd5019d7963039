//! Operations for model-based testing.
//!
//! Operations represent every registrar command. They are generated
//! randomly (by proptest or from seeded bytes via `arbitrary`) and applied
//! to both the model and the real registrar.

use arbitrary::Arbitrary;
use registrar_core::{EntityKind, RegistrarError};

/// Student identifier in the model (kept tiny so collisions are common).
pub type ModelStudentId = u8;

/// Course identifier in the model.
pub type ModelCourseId = u8;

/// Teacher identifier in the model.
pub type ModelTeacherId = u8;

/// Operations that can be applied to the system.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Register a student.
    AddStudent {
        /// Student to add.
        student: ModelStudentId,
    },

    /// Register a course.
    AddCourse {
        /// Course to add.
        course: ModelCourseId,
        /// Explicit capacity, or `None` for the configured default.
        capacity: Option<u8>,
    },

    /// Register a teacher.
    AddTeacher {
        /// Teacher to add.
        teacher: ModelTeacherId,
    },

    /// Remove a student (cascades).
    RemoveStudent {
        /// Student to remove.
        student: ModelStudentId,
    },

    /// Remove a course (cascades).
    RemoveCourse {
        /// Course to remove.
        course: ModelCourseId,
    },

    /// Remove a teacher (cascades).
    RemoveTeacher {
        /// Teacher to remove.
        teacher: ModelTeacherId,
    },

    /// Enroll a student in a course.
    Enroll {
        /// Student enrolling.
        student: ModelStudentId,
        /// Target course.
        course: ModelCourseId,
    },

    /// Drop a student from a course.
    Drop {
        /// Student dropping.
        student: ModelStudentId,
        /// Course being dropped.
        course: ModelCourseId,
    },

    /// Assign a teacher to a course.
    Assign {
        /// Teacher assigned.
        teacher: ModelTeacherId,
        /// Target course.
        course: ModelCourseId,
    },

    /// Remove a teacher from a course.
    Unassign {
        /// Teacher unassigned.
        teacher: ModelTeacherId,
        /// Target course.
        course: ModelCourseId,
    },
}

impl Operation {
    /// Fold IDs into `0..id_space` and capacities into `0..=max_capacity`.
    ///
    /// Raw arbitrary values spread over 256 IDs, which makes interesting
    /// collisions (enrolling an existing student twice) vanishingly rare.
    #[must_use]
    pub fn normalized(self, id_space: u8, max_capacity: u8) -> Self {
        let id = |n: u8| n % id_space.max(1);
        let cap = |c: u8| c % max_capacity.saturating_add(1).max(1);

        match self {
            Self::AddStudent { student } => Self::AddStudent { student: id(student) },
            Self::AddCourse { course, capacity } => {
                Self::AddCourse { course: id(course), capacity: capacity.map(cap) }
            },
            Self::AddTeacher { teacher } => Self::AddTeacher { teacher: id(teacher) },
            Self::RemoveStudent { student } => Self::RemoveStudent { student: id(student) },
            Self::RemoveCourse { course } => Self::RemoveCourse { course: id(course) },
            Self::RemoveTeacher { teacher } => Self::RemoveTeacher { teacher: id(teacher) },
            Self::Enroll { student, course } => Self::Enroll { student: id(student), course: id(course) },
            Self::Drop { student, course } => Self::Drop { student: id(student), course: id(course) },
            Self::Assign { teacher, course } => Self::Assign { teacher: id(teacher), course: id(course) },
            Self::Unassign { teacher, course } => {
                Self::Unassign { teacher: id(teacher), course: id(course) }
            },
        }
    }
}

/// Map a model student ID onto the real registrar's ID.
pub fn student_key(id: ModelStudentId) -> String {
    format!("S{id:03}")
}

/// Map a model course ID onto the real registrar's ID.
pub fn course_key(id: ModelCourseId) -> String {
    format!("C{id:03}")
}

/// Map a model teacher ID onto the real registrar's ID.
pub fn teacher_key(id: ModelTeacherId) -> String {
    format!("T{id:03}")
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded.
    Ok,

    /// Operation failed with expected error.
    Error(OperationError),
}

/// Expected errors that can occur during operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// ID already taken.
    DuplicateId(EntityKind),

    /// ID not present.
    NotFound(EntityKind),

    /// Pair already enrolled.
    AlreadyEnrolled,

    /// Pair not enrolled.
    NotEnrolled,

    /// No seat left.
    CourseFull,

    /// Pair already assigned.
    AlreadyAssigned,

    /// Pair not assigned.
    NotAssigned,

    /// Store or lock failure; never produced by the model.
    Fatal,
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

impl<T> From<Result<T, RegistrarError>> for OperationResult {
    fn from(result: Result<T, RegistrarError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => Self::Error(OperationError::from(&e)),
        }
    }
}

impl From<&RegistrarError> for OperationError {
    fn from(err: &RegistrarError) -> Self {
        match err {
            RegistrarError::DuplicateId { kind, .. } => Self::DuplicateId(*kind),
            RegistrarError::NotFound { kind, .. } => Self::NotFound(*kind),
            RegistrarError::AlreadyEnrolled { .. } => Self::AlreadyEnrolled,
            RegistrarError::NotEnrolled { .. } => Self::NotEnrolled,
            RegistrarError::CourseFull { .. } => Self::CourseFull,
            RegistrarError::AlreadyAssigned { .. } => Self::AlreadyAssigned,
            RegistrarError::NotAssigned { .. } => Self::NotAssigned,
            RegistrarError::Store(_) | RegistrarError::Poisoned => Self::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_folds_ids_and_capacity() {
        let op = Operation::AddCourse { course: 200, capacity: Some(250) }.normalized(4, 3);
        assert_eq!(op, Operation::AddCourse { course: 0, capacity: Some(2) });

        let op = Operation::Enroll { student: 7, course: 9 }.normalized(4, 3);
        assert_eq!(op, Operation::Enroll { student: 3, course: 1 });
    }

    #[test]
    fn normalized_tolerates_zero_space() {
        let op = Operation::AddStudent { student: 42 }.normalized(0, 0);
        assert_eq!(op, Operation::AddStudent { student: 0 });
    }

    #[test]
    fn registrar_errors_classify() {
        let err = RegistrarError::CourseFull { course: "C000".into(), capacity: 1 };
        assert_eq!(OperationResult::from(Err::<(), _>(err)), OperationResult::Error(OperationError::CourseFull));
    }
}
