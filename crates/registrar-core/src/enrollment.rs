//! Enrollment engine.
//!
//! The only writer of the student -> course and teacher -> course relations.
//! Every check runs before the single relation write, so a rejected command
//! leaves state exactly as it was.

use tracing::debug;

use crate::{
    entity::Course,
    error::RegistrarError,
    id::{CourseId, EntityKind, StudentId, TeacherId},
    registrar::Registrar,
};

impl Registrar {
    /// Enroll a student in a course.
    ///
    /// # Errors
    ///
    /// - `RegistrarError::NotFound` if the student or course doesn't exist
    ///   (student checked first)
    /// - `RegistrarError::AlreadyEnrolled` if the pair already exists
    /// - `RegistrarError::CourseFull` if every seat is taken
    pub fn enroll(
        &mut self,
        student: impl Into<StudentId>,
        course: impl Into<CourseId>,
    ) -> Result<(), RegistrarError> {
        let student = student.into();
        let course = course.into();

        if !self.catalog.students.contains(&student) {
            return Err(RegistrarError::not_found(EntityKind::Student, student));
        }
        let capacity = self
            .catalog
            .courses
            .get(&course)
            .map(Course::capacity)
            .ok_or_else(|| RegistrarError::not_found(EntityKind::Course, &course))?;

        if self.enrollments.contains(&student, &course) {
            return Err(RegistrarError::AlreadyEnrolled { student, course });
        }
        if self.enrollments.lefts(&course).len() >= capacity as usize {
            return Err(RegistrarError::CourseFull { course, capacity });
        }

        self.enrollments.link(student.clone(), course.clone());
        debug_assert!(self.enrollments.is_consistent(), "invariant: enrollment mirror after enroll");

        debug!(student = %student, course = %course, "student enrolled");
        Ok(())
    }

    /// Drop a student from a course.
    ///
    /// # Errors
    ///
    /// - `RegistrarError::NotFound` if the student or course doesn't exist
    /// - `RegistrarError::NotEnrolled` if the student isn't on the roster
    pub fn drop_course(
        &mut self,
        student: impl Into<StudentId>,
        course: impl Into<CourseId>,
    ) -> Result<(), RegistrarError> {
        let student = student.into();
        let course = course.into();

        self.require_student(&student)?;
        self.require_course(&course)?;

        if !self.enrollments.unlink(&student, &course) {
            return Err(RegistrarError::NotEnrolled { student, course });
        }
        debug_assert!(self.enrollments.is_consistent(), "invariant: enrollment mirror after drop");

        debug!(student = %student, course = %course, "student dropped course");
        Ok(())
    }

    /// Assign a teacher to a course. Courses may have several teachers.
    ///
    /// # Errors
    ///
    /// - `RegistrarError::NotFound` if the teacher or course doesn't exist
    /// - `RegistrarError::AlreadyAssigned` if the pair already exists
    pub fn assign_teacher(
        &mut self,
        teacher: impl Into<TeacherId>,
        course: impl Into<CourseId>,
    ) -> Result<(), RegistrarError> {
        let teacher = teacher.into();
        let course = course.into();

        self.require_teacher(&teacher)?;
        self.require_course(&course)?;

        if !self.assignments.link(teacher.clone(), course.clone()) {
            return Err(RegistrarError::AlreadyAssigned { teacher, course });
        }
        debug_assert!(self.assignments.is_consistent(), "invariant: assignment mirror after assign");

        debug!(teacher = %teacher, course = %course, "teacher assigned");
        Ok(())
    }

    /// Remove a teacher from a course.
    ///
    /// # Errors
    ///
    /// - `RegistrarError::NotFound` if the teacher or course doesn't exist
    /// - `RegistrarError::NotAssigned` if the teacher doesn't teach it
    pub fn unassign_teacher(
        &mut self,
        teacher: impl Into<TeacherId>,
        course: impl Into<CourseId>,
    ) -> Result<(), RegistrarError> {
        let teacher = teacher.into();
        let course = course.into();

        self.require_teacher(&teacher)?;
        self.require_course(&course)?;

        if !self.assignments.unlink(&teacher, &course) {
            return Err(RegistrarError::NotAssigned { teacher, course });
        }
        debug_assert!(self.assignments.is_consistent(), "invariant: assignment mirror after unassign");

        debug!(teacher = %teacher, course = %course, "teacher unassigned");
        Ok(())
    }

    /// Clear every enrollment held by a student. Idempotent.
    pub(crate) fn cascade_remove_student(&mut self, student: &StudentId) {
        let dropped = self.enrollments.remove_left(student);
        if !dropped.is_empty() {
            debug!(student = %student, courses = dropped.len(), "cascade cleared enrollments");
        }
    }

    /// Clear a course's roster and teacher assignments. Idempotent.
    pub(crate) fn cascade_remove_course(&mut self, course: &CourseId) {
        let students = self.enrollments.remove_right(course);
        let teachers = self.assignments.remove_right(course);
        if !students.is_empty() || !teachers.is_empty() {
            debug!(
                course = %course,
                students = students.len(),
                teachers = teachers.len(),
                "cascade cleared roster and assignments"
            );
        }
    }

    /// Clear every course assignment held by a teacher. Idempotent.
    pub(crate) fn cascade_remove_teacher_assignments(&mut self, teacher: &TeacherId) {
        let courses = self.assignments.remove_left(teacher);
        if !courses.is_empty() {
            debug!(teacher = %teacher, courses = courses.len(), "cascade cleared assignments");
        }
    }

    pub(crate) fn require_student(&self, id: &StudentId) -> Result<(), RegistrarError> {
        if self.catalog.students.contains(id) {
            Ok(())
        } else {
            Err(RegistrarError::not_found(EntityKind::Student, id))
        }
    }

    pub(crate) fn require_course(&self, id: &CourseId) -> Result<(), RegistrarError> {
        if self.catalog.courses.contains(id) {
            Ok(())
        } else {
            Err(RegistrarError::not_found(EntityKind::Course, id))
        }
    }

    pub(crate) fn require_teacher(&self, id: &TeacherId) -> Result<(), RegistrarError> {
        if self.catalog.teachers.contains(id) {
            Ok(())
        } else {
            Err(RegistrarError::not_found(EntityKind::Teacher, id))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::RegistrarError, id::EntityKind, registrar::Registrar};

    fn registrar() -> Registrar {
        let mut registrar = Registrar::default();
        for (id, name) in [("S001", "Ada"), ("S002", "Grace"), ("S003", "Barbara")] {
            registrar.add_student(id, name).unwrap();
        }
        registrar.add_course("CS101", "Intro", Some(2)).unwrap();
        registrar.add_teacher("T001", "Knuth").unwrap();
        registrar
    }

    #[test]
    fn enroll_checks_student_before_course() {
        let mut registrar = registrar();
        let err = registrar.enroll("S404", "CS404").unwrap_err();
        assert!(matches!(err, RegistrarError::NotFound { kind: EntityKind::Student, .. }));

        let err = registrar.enroll("S001", "CS404").unwrap_err();
        assert!(matches!(err, RegistrarError::NotFound { kind: EntityKind::Course, .. }));
    }

    #[test]
    fn already_enrolled_wins_over_course_full() {
        let mut registrar = registrar();
        registrar.enroll("S001", "CS101").unwrap();
        registrar.enroll("S002", "CS101").unwrap();

        let err = registrar.enroll("S001", "CS101").unwrap_err();
        assert!(matches!(err, RegistrarError::AlreadyEnrolled { .. }));
    }

    #[test]
    fn drop_unknown_pair_is_not_enrolled() {
        let mut registrar = registrar();
        let err = registrar.drop_course("S001", "CS101").unwrap_err();
        assert!(matches!(err, RegistrarError::NotEnrolled { .. }));
    }

    #[test]
    fn drop_missing_course_is_not_found() {
        let mut registrar = registrar();
        let err = registrar.drop_course("S001", "CS404").unwrap_err();
        assert!(matches!(err, RegistrarError::NotFound { kind: EntityKind::Course, .. }));
    }

    #[test]
    fn assign_twice_is_rejected() {
        let mut registrar = registrar();
        registrar.assign_teacher("T001", "CS101").unwrap();

        let err = registrar.assign_teacher("T001", "CS101").unwrap_err();
        assert!(matches!(err, RegistrarError::AlreadyAssigned { .. }));
    }

    #[test]
    fn assignment_changes_keep_relation_consistent() {
        let mut registrar = registrar();
        registrar.add_course("CS201", "Data Structures", None).unwrap();
        registrar.assign_teacher("T001", "CS101").unwrap();
        registrar.assign_teacher("T001", "CS201").unwrap();
        registrar.unassign_teacher("T001", "CS101").unwrap();

        assert!(registrar.assignments.is_consistent());
        assert!(registrar.verify_invariants().is_ok());
        assert_eq!(registrar.teacher_course_count("T001").unwrap(), 1);
    }

    #[test]
    fn unassign_requires_assignment() {
        let mut registrar = registrar();
        let err = registrar.unassign_teacher("T001", "CS101").unwrap_err();
        assert!(matches!(err, RegistrarError::NotAssigned { .. }));

        registrar.assign_teacher("T001", "CS101").unwrap();
        registrar.unassign_teacher("T001", "CS101").unwrap();
        assert_eq!(registrar.teacher_course_count("T001").unwrap(), 0);
    }

    #[test]
    fn cascade_is_idempotent() {
        let mut registrar = registrar();
        registrar.enroll("S001", "CS101").unwrap();

        let id = "S001".into();
        registrar.cascade_remove_student(&id);
        registrar.cascade_remove_student(&id);

        assert_eq!(registrar.enrollment_total(), 0);
        assert!(registrar.verify_invariants().is_ok());
    }
}
