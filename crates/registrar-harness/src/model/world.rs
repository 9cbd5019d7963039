//! Model world - the reference registrar.
//!
//! Keeps entities in ordered maps and each relation as one flat list of
//! pairs in link order. Rosters and schedules are filters over that list,
//! so ordering rules fall out without any bookkeeping.

use std::collections::BTreeMap;

use registrar_core::EntityKind;

use super::operation::{
    ModelCourseId, ModelStudentId, ModelTeacherId, Operation, OperationError, OperationResult,
};

/// Observable state for oracle comparison.
///
/// Everything is keyed by model ID in ascending order; nested lists keep
/// relation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Each student's schedule.
    pub student_schedules: Vec<(ModelStudentId, Vec<ModelCourseId>)>,
    /// Each course's capacity and roster.
    pub course_rosters: Vec<(ModelCourseId, u32, Vec<ModelStudentId>)>,
    /// Each teacher's schedule.
    pub teacher_schedules: Vec<(ModelTeacherId, Vec<ModelCourseId>)>,
}

/// Model world - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelWorld {
    default_capacity: u32,
    students: BTreeMap<ModelStudentId, ()>,
    courses: BTreeMap<ModelCourseId, u32>,
    teachers: BTreeMap<ModelTeacherId, ()>,
    /// (student, course) in link order.
    enrollments: Vec<(ModelStudentId, ModelCourseId)>,
    /// (teacher, course) in link order.
    assignments: Vec<(ModelTeacherId, ModelCourseId)>,
}

impl ModelWorld {
    /// Create an empty world whose capacity-less courses get
    /// `default_capacity` seats.
    pub fn new(default_capacity: u32) -> Self {
        Self {
            default_capacity,
            students: BTreeMap::new(),
            courses: BTreeMap::new(),
            teachers: BTreeMap::new(),
            enrollments: Vec::new(),
            assignments: Vec::new(),
        }
    }

    /// Apply an operation and return the result.
    ///
    /// This is the main entry point for model-based testing.
    /// The result should match the real implementation's result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        let result = match *op {
            Operation::AddStudent { student } => {
                insert(&mut self.students, student, (), EntityKind::Student)
            },
            Operation::AddCourse { course, capacity } => {
                let capacity = capacity.map_or(self.default_capacity, u32::from);
                insert(&mut self.courses, course, capacity, EntityKind::Course)
            },
            Operation::AddTeacher { teacher } => {
                insert(&mut self.teachers, teacher, (), EntityKind::Teacher)
            },
            Operation::RemoveStudent { student } => self.remove_student(student),
            Operation::RemoveCourse { course } => self.remove_course(course),
            Operation::RemoveTeacher { teacher } => self.remove_teacher(teacher),
            Operation::Enroll { student, course } => self.enroll(student, course),
            Operation::Drop { student, course } => self.drop_course(student, course),
            Operation::Assign { teacher, course } => self.assign(teacher, course),
            Operation::Unassign { teacher, course } => self.unassign(teacher, course),
        };

        match result {
            Ok(()) => OperationResult::Ok,
            Err(e) => OperationResult::Error(e),
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            student_schedules: self
                .students
                .keys()
                .map(|&s| {
                    (s, self.enrollments.iter().filter(|(es, _)| *es == s).map(|(_, c)| *c).collect())
                })
                .collect(),
            course_rosters: self
                .courses
                .iter()
                .map(|(&c, &capacity)| {
                    let roster =
                        self.enrollments.iter().filter(|(_, ec)| *ec == c).map(|(s, _)| *s).collect();
                    (c, capacity, roster)
                })
                .collect(),
            teacher_schedules: self
                .teachers
                .keys()
                .map(|&t| {
                    (t, self.assignments.iter().filter(|(at, _)| *at == t).map(|(_, c)| *c).collect())
                })
                .collect(),
        }
    }

    /// Total number of enrollments.
    pub fn enrollment_count(&self) -> usize {
        self.enrollments.len()
    }

    fn remove_student(&mut self, student: ModelStudentId) -> Result<(), OperationError> {
        if self.students.remove(&student).is_none() {
            return Err(OperationError::NotFound(EntityKind::Student));
        }
        self.enrollments.retain(|(s, _)| *s != student);
        Ok(())
    }

    fn remove_course(&mut self, course: ModelCourseId) -> Result<(), OperationError> {
        if self.courses.remove(&course).is_none() {
            return Err(OperationError::NotFound(EntityKind::Course));
        }
        self.enrollments.retain(|(_, c)| *c != course);
        self.assignments.retain(|(_, c)| *c != course);
        Ok(())
    }

    fn remove_teacher(&mut self, teacher: ModelTeacherId) -> Result<(), OperationError> {
        if self.teachers.remove(&teacher).is_none() {
            return Err(OperationError::NotFound(EntityKind::Teacher));
        }
        self.assignments.retain(|(t, _)| *t != teacher);
        Ok(())
    }

    fn enroll(&mut self, student: ModelStudentId, course: ModelCourseId) -> Result<(), OperationError> {
        if !self.students.contains_key(&student) {
            return Err(OperationError::NotFound(EntityKind::Student));
        }
        let capacity =
            *self.courses.get(&course).ok_or(OperationError::NotFound(EntityKind::Course))?;

        if self.enrollments.contains(&(student, course)) {
            return Err(OperationError::AlreadyEnrolled);
        }
        let enrolled = self.enrollments.iter().filter(|(_, c)| *c == course).count();
        if enrolled >= capacity as usize {
            return Err(OperationError::CourseFull);
        }

        self.enrollments.push((student, course));
        Ok(())
    }

    fn drop_course(&mut self, student: ModelStudentId, course: ModelCourseId) -> Result<(), OperationError> {
        if !self.students.contains_key(&student) {
            return Err(OperationError::NotFound(EntityKind::Student));
        }
        if !self.courses.contains_key(&course) {
            return Err(OperationError::NotFound(EntityKind::Course));
        }

        let before = self.enrollments.len();
        self.enrollments.retain(|pair| *pair != (student, course));
        if self.enrollments.len() == before {
            return Err(OperationError::NotEnrolled);
        }
        Ok(())
    }

    fn assign(&mut self, teacher: ModelTeacherId, course: ModelCourseId) -> Result<(), OperationError> {
        if !self.teachers.contains_key(&teacher) {
            return Err(OperationError::NotFound(EntityKind::Teacher));
        }
        if !self.courses.contains_key(&course) {
            return Err(OperationError::NotFound(EntityKind::Course));
        }
        if self.assignments.contains(&(teacher, course)) {
            return Err(OperationError::AlreadyAssigned);
        }

        self.assignments.push((teacher, course));
        Ok(())
    }

    fn unassign(&mut self, teacher: ModelTeacherId, course: ModelCourseId) -> Result<(), OperationError> {
        if !self.teachers.contains_key(&teacher) {
            return Err(OperationError::NotFound(EntityKind::Teacher));
        }
        if !self.courses.contains_key(&course) {
            return Err(OperationError::NotFound(EntityKind::Course));
        }

        let before = self.assignments.len();
        self.assignments.retain(|pair| *pair != (teacher, course));
        if self.assignments.len() == before {
            return Err(OperationError::NotAssigned);
        }
        Ok(())
    }
}

fn insert<V>(
    table: &mut BTreeMap<u8, V>,
    id: u8,
    value: V,
    kind: EntityKind,
) -> Result<(), OperationError> {
    if table.contains_key(&id) {
        return Err(OperationError::DuplicateId(kind));
    }
    table.insert(id, value);
    Ok(())
}
