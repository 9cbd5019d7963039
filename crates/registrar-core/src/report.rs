//! Aggregate reports.
//!
//! Reports are plain data; rendering them is up to the caller. Rows are
//! ordered by entity ID and nested lists follow relation order, so the same
//! state always yields the same report.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    id::{CourseId, StudentId, TeacherId},
    registrar::Registrar,
};

/// Per-student enrollment load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentLoad {
    /// Student ID.
    pub id: StudentId,
    /// Student name.
    pub name: String,
    /// Enrolled courses in enrollment order.
    pub courses: Vec<CourseId>,
}

/// Registry-wide enrollment summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentReport {
    /// Registered students.
    pub total_students: usize,
    /// Registered courses.
    pub total_courses: usize,
    /// (student, course) pairs.
    pub total_enrollments: usize,
    /// Students enrolled in nothing.
    pub students_without_courses: usize,
    /// Mean courses per student (0.0 with no students).
    pub average_courses_per_student: f64,
    /// One row per student, by ID.
    pub students: Vec<StudentLoad>,
}

/// Per-course fill level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseFill {
    /// Course ID.
    pub id: CourseId,
    /// Course name.
    pub name: String,
    /// Seat limit.
    pub capacity: u32,
    /// Current roster size.
    pub enrolled: usize,
    /// `capacity - enrolled`.
    pub seats_remaining: usize,
    /// `enrolled / capacity`, 1.0 for a zero-capacity course.
    pub fill_rate: f64,
    /// Whether no seat is left.
    pub is_full: bool,
    /// Assigned teachers in assignment order.
    pub teachers: Vec<TeacherId>,
}

/// Registry-wide course summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseReport {
    /// One row per course, by ID.
    pub courses: Vec<CourseFill>,
    /// Sum of all capacities.
    pub total_capacity: u64,
    /// Sum of all rosters.
    pub total_enrolled: usize,
    /// Courses with no seat left.
    pub full_courses: usize,
}

/// Per-teacher workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherLoad {
    /// Teacher ID.
    pub id: TeacherId,
    /// Teacher name.
    pub name: String,
    /// Assigned courses in assignment order.
    pub courses: Vec<CourseId>,
    /// Distinct students across those courses.
    pub student_count: usize,
}

/// Registry-wide teaching summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherReport {
    /// One row per teacher, by ID.
    pub teachers: Vec<TeacherLoad>,
    /// Registered teachers.
    pub total_teachers: usize,
    /// Teachers assigned to nothing.
    pub teachers_without_courses: usize,
}

impl Registrar {
    /// Summarize enrollments across all students.
    #[allow(clippy::cast_precision_loss)]
    pub fn generate_enrollment_report(&self) -> EnrollmentReport {
        let students: Vec<StudentLoad> = self
            .students()
            .map(|s| StudentLoad {
                id: s.id().clone(),
                name: s.name().to_string(),
                courses: self.enrollments.rights(s.id()).to_vec(),
            })
            .collect();

        let total_enrollments = self.enrollments.len();
        let average_courses_per_student = if students.is_empty() {
            0.0
        } else {
            total_enrollments as f64 / students.len() as f64
        };

        EnrollmentReport {
            total_students: students.len(),
            total_courses: self.catalog.courses.len(),
            total_enrollments,
            students_without_courses: students.iter().filter(|s| s.courses.is_empty()).count(),
            average_courses_per_student,
            students,
        }
    }

    /// Summarize seat usage per course.
    #[allow(clippy::cast_precision_loss)]
    pub fn generate_course_report(&self) -> CourseReport {
        let courses: Vec<CourseFill> = self
            .courses()
            .map(|c| {
                let enrolled = self.enrollments.lefts(c.id()).len();
                let capacity = c.capacity();
                let fill_rate =
                    if capacity == 0 { 1.0 } else { enrolled as f64 / f64::from(capacity) };

                CourseFill {
                    id: c.id().clone(),
                    name: c.name().to_string(),
                    capacity,
                    enrolled,
                    seats_remaining: (capacity as usize).saturating_sub(enrolled),
                    fill_rate,
                    is_full: c.is_full_at(enrolled),
                    teachers: self.assignments.lefts(c.id()).to_vec(),
                }
            })
            .collect();

        CourseReport {
            total_capacity: courses.iter().map(|c| u64::from(c.capacity)).sum(),
            total_enrolled: courses.iter().map(|c| c.enrolled).sum(),
            full_courses: courses.iter().filter(|c| c.is_full).count(),
            courses,
        }
    }

    /// Summarize teaching workload per teacher.
    pub fn generate_teacher_report(&self) -> TeacherReport {
        let teachers: Vec<TeacherLoad> = self
            .teachers()
            .map(|t| {
                let courses = self.assignments.rights(t.id());
                let students: HashSet<&StudentId> =
                    courses.iter().flat_map(|c| self.enrollments.lefts(c)).collect();

                TeacherLoad {
                    id: t.id().clone(),
                    name: t.name().to_string(),
                    courses: courses.to_vec(),
                    student_count: students.len(),
                }
            })
            .collect();

        TeacherReport {
            total_teachers: teachers.len(),
            teachers_without_courses: teachers.iter().filter(|t| t.courses.is_empty()).count(),
            teachers,
        }
    }
}
