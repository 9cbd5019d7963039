//! Real registrar behind the model's interface.
//!
//! Translates model operations into registrar commands and reads the
//! registrar back into an [`ObservableState`] so the two can be compared
//! directly.

use registrar_core::{Registrar, RegistrarConfig};

use crate::model::{
    ObservableState, Operation, OperationResult,
    operation::{course_key, student_key, teacher_key},
};

/// Real system wrapper that mirrors `ModelWorld`'s interface.
#[derive(Debug)]
pub struct RealWorld {
    registrar: Registrar,
}

impl RealWorld {
    /// Empty registrar with the given default capacity.
    pub fn new(default_capacity: u32) -> Self {
        let config = RegistrarConfig::default().with_default_capacity(default_capacity);
        Self { registrar: Registrar::new(config) }
    }

    /// Apply an operation to the registrar.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        let r = &mut self.registrar;
        match *op {
            Operation::AddStudent { student } => {
                let key = student_key(student);
                r.add_student(key.as_str(), key.as_str()).into()
            },
            Operation::AddCourse { course, capacity } => {
                let key = course_key(course);
                r.add_course(key.as_str(), key.as_str(), capacity.map(u32::from)).into()
            },
            Operation::AddTeacher { teacher } => {
                let key = teacher_key(teacher);
                r.add_teacher(key.as_str(), key.as_str()).into()
            },
            Operation::RemoveStudent { student } => r.remove_student(student_key(student)).into(),
            Operation::RemoveCourse { course } => r.remove_course(course_key(course)).into(),
            Operation::RemoveTeacher { teacher } => r.remove_teacher(teacher_key(teacher)).into(),
            Operation::Enroll { student, course } => {
                r.enroll(student_key(student), course_key(course)).into()
            },
            Operation::Drop { student, course } => {
                r.drop_course(student_key(student), course_key(course)).into()
            },
            Operation::Assign { teacher, course } => {
                r.assign_teacher(teacher_key(teacher), course_key(course)).into()
            },
            Operation::Unassign { teacher, course } => {
                r.unassign_teacher(teacher_key(teacher), course_key(course)).into()
            },
        }
    }

    /// Read the registrar back in model terms.
    pub fn observable_state(&self) -> ObservableState {
        let r = &self.registrar;
        ObservableState {
            student_schedules: r
                .students()
                .filter_map(|s| {
                    let schedule = r.student_schedule(s.id()).ok()?;
                    let courses: Vec<_> = schedule.iter().filter_map(|e| model_id(e.id.as_str())).collect();
                    Some((model_id(s.id().as_str())?, courses))
                })
                .collect(),
            course_rosters: r
                .courses()
                .filter_map(|c| {
                    let roster = r.course_roster(c.id()).ok()?;
                    let students: Vec<_> = roster.iter().filter_map(|e| model_id(e.id.as_str())).collect();
                    Some((model_id(c.id().as_str())?, c.capacity(), students))
                })
                .collect(),
            teacher_schedules: r
                .teachers()
                .filter_map(|t| {
                    let schedule = r.teacher_schedule(t.id()).ok()?;
                    let courses: Vec<_> = schedule.iter().filter_map(|e| model_id(e.id.as_str())).collect();
                    Some((model_id(t.id().as_str())?, courses))
                })
                .collect(),
        }
    }

    /// The wrapped registrar.
    pub fn registrar(&self) -> &Registrar {
        &self.registrar
    }
}

/// Inverse of the `*_key` helpers: `"S007"` -> `7`.
fn model_id(key: &str) -> Option<u8> {
    key.get(1..)?.parse().ok()
}
