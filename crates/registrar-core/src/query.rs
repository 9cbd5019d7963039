//! Rosters and schedules.
//!
//! Read-only views over the registrar. Every list follows relation order
//! (first linked, first listed), so repeated calls without an intervening
//! mutation return identical results.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    error::RegistrarError,
    id::{CourseId, StudentId, TeacherId},
    registrar::Registrar,
};

/// A student on a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    /// Student ID.
    pub id: StudentId,
    /// Student name.
    pub name: String,
}

/// A course on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    /// Course ID.
    pub id: CourseId,
    /// Course name.
    pub name: String,
}

impl Registrar {
    /// Students enrolled in a course, in enrollment order.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the course doesn't exist.
    pub fn course_roster(&self, course: impl Into<CourseId>) -> Result<Vec<RosterEntry>, RegistrarError> {
        let course = course.into();
        self.require_course(&course)?;

        Ok(self.roster_entries(self.enrollments.lefts(&course)))
    }

    /// Courses a student is enrolled in, in enrollment order.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the student doesn't exist.
    pub fn student_schedule(
        &self,
        student: impl Into<StudentId>,
    ) -> Result<Vec<ScheduleEntry>, RegistrarError> {
        let student = student.into();
        self.require_student(&student)?;

        Ok(self.schedule_entries(self.enrollments.rights(&student)))
    }

    /// Courses a teacher is assigned to, in assignment order.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the teacher doesn't exist.
    pub fn teacher_schedule(
        &self,
        teacher: impl Into<TeacherId>,
    ) -> Result<Vec<ScheduleEntry>, RegistrarError> {
        let teacher = teacher.into();
        self.require_teacher(&teacher)?;

        Ok(self.schedule_entries(self.assignments.rights(&teacher)))
    }

    /// Every student taught by a teacher, once each.
    ///
    /// Ordered by first appearance: courses in assignment order, then each
    /// roster in enrollment order.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the teacher doesn't exist.
    pub fn teacher_roster(
        &self,
        teacher: impl Into<TeacherId>,
    ) -> Result<Vec<RosterEntry>, RegistrarError> {
        let teacher = teacher.into();
        self.require_teacher(&teacher)?;

        let mut seen = HashSet::new();
        let students: Vec<StudentId> = self
            .assignments
            .rights(&teacher)
            .iter()
            .flat_map(|course| self.enrollments.lefts(course))
            .filter(|student| seen.insert(*student))
            .cloned()
            .collect();

        Ok(self.roster_entries(&students))
    }

    /// Current roster size of a course.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the course doesn't exist.
    pub fn course_enrollment_count(&self, course: impl Into<CourseId>) -> Result<usize, RegistrarError> {
        let course = course.into();
        self.require_course(&course)?;
        Ok(self.enrollments.lefts(&course).len())
    }

    /// Whether every seat in a course is taken.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the course doesn't exist.
    pub fn is_course_full(&self, course: impl Into<CourseId>) -> Result<bool, RegistrarError> {
        let course = course.into();
        let enrolled = self.course_enrollment_count(&course)?;
        Ok(self.catalog.courses.get(&course).is_some_and(|c| c.is_full_at(enrolled)))
    }

    /// Number of courses a teacher is assigned to.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the teacher doesn't exist.
    pub fn teacher_course_count(&self, teacher: impl Into<TeacherId>) -> Result<usize, RegistrarError> {
        let teacher = teacher.into();
        self.require_teacher(&teacher)?;
        Ok(self.assignments.rights(&teacher).len())
    }

    /// Teachers assigned to a course, in assignment order.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the course doesn't exist.
    pub fn course_teachers(&self, course: impl Into<CourseId>) -> Result<Vec<TeacherId>, RegistrarError> {
        let course = course.into();
        self.require_course(&course)?;
        Ok(self.assignments.lefts(&course).to_vec())
    }

    fn roster_entries(&self, students: &[StudentId]) -> Vec<RosterEntry> {
        students
            .iter()
            .filter_map(|id| self.catalog.students.get(id))
            .map(|s| RosterEntry { id: s.id().clone(), name: s.name().to_string() })
            .collect()
    }

    fn schedule_entries(&self, courses: &[CourseId]) -> Vec<ScheduleEntry> {
        courses
            .iter()
            .filter_map(|id| self.catalog.courses.get(id))
            .map(|c| ScheduleEntry { id: c.id().clone(), name: c.name().to_string() })
            .collect()
    }
}
