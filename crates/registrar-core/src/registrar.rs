//! Registrar
//!
//! Owns every entity record and both relations, and is the only way to
//! change them.
//!
//! ## Responsibilities
//!
//! - Entity Lifecycle: Create and remove students, courses and teachers
//! - Relation Integrity: Route every enrollment and assignment change
//!   through one relation object per association
//! - Initialization: Seed a demo state or restore from a persistence store
//!
//! ## Design
//!
//! - Explicit instances: No process-wide registrar, callers construct one
//! - Cascade before delete: Removing an entity first clears its relation
//!   entries, so no roster or schedule ever names a missing ID
//! - Store is optional: Persistence is only touched by `initialize`/`save`

use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    config::RegistrarConfig,
    entity::{Course, Student, Teacher},
    error::{InvariantViolation, RegistrarError, StoreError},
    id::{CourseId, EntityKind, StudentId, TeacherId},
    persistence::{Persistence, SNAPSHOT_VERSION, Snapshot},
    relation::{Relation, RelationDefect},
    seed,
};

/// Relation name used in invariant reports.
const ENROLLMENT: &str = "enrollment";

/// Relation name used in invariant reports.
const ASSIGNMENT: &str = "assignment";

/// The course registry.
#[derive(Debug, Clone)]
pub struct Registrar {
    config: RegistrarConfig,
    pub(crate) catalog: Catalog,
    /// Student -> course membership.
    pub(crate) enrollments: Relation<StudentId, CourseId>,
    /// Teacher -> course assignment.
    pub(crate) assignments: Relation<TeacherId, CourseId>,
}

impl Registrar {
    /// Create an empty registrar.
    pub fn new(config: RegistrarConfig) -> Self {
        Self {
            config,
            catalog: Catalog::new(),
            enrollments: Relation::new(),
            assignments: Relation::new(),
        }
    }

    /// Build the baseline state.
    ///
    /// Loads from `store` when it holds a snapshot, otherwise seeds the demo
    /// course and teacher set.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::Store` if the store fails to load or holds an
    /// unknown snapshot version, or the rule error that rejected an
    /// inconsistent snapshot.
    pub fn initialize(
        config: RegistrarConfig,
        store: Option<&dyn Persistence>,
    ) -> Result<Self, RegistrarError> {
        let loaded = match store {
            Some(store) => store.load()?,
            None => None,
        };

        match loaded {
            Some(snapshot) => {
                let registrar = Self::from_snapshot(config, snapshot)?;
                info!(
                    students = registrar.catalog.students.len(),
                    courses = registrar.catalog.courses.len(),
                    teachers = registrar.catalog.teachers.len(),
                    "registrar restored from store"
                );
                Ok(registrar)
            },
            None => {
                let registrar = Self::from_snapshot(config, seed::demo_snapshot())?;
                info!(courses = registrar.catalog.courses.len(), "registrar seeded with demo data");
                Ok(registrar)
            },
        }
    }

    /// Rebuild a registrar from a snapshot.
    ///
    /// Entities and pairs are replayed through the normal commands, so a
    /// snapshot that breaks any rule is rejected as a whole.
    ///
    /// # Errors
    ///
    /// - `RegistrarError::Store` if the snapshot layout version is unknown
    /// - The first rule error hit while replaying
    pub fn from_snapshot(config: RegistrarConfig, snapshot: Snapshot) -> Result<Self, RegistrarError> {
        if snapshot.version != SNAPSHOT_VERSION {
            warn!(version = snapshot.version, "rejected snapshot with unknown version");
            return Err(StoreError::Decode(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            ))
            .into());
        }

        let mut registrar = Self::new(config);

        registrar.replay(snapshot).inspect_err(|e| {
            warn!("rejected snapshot: {}", e);
        })?;

        Ok(registrar)
    }

    fn replay(&mut self, snapshot: Snapshot) -> Result<(), RegistrarError> {
        for student in snapshot.students {
            self.insert_student(student)?;
        }
        for course in snapshot.courses {
            self.insert_course(course)?;
        }
        for teacher in snapshot.teachers {
            self.insert_teacher(teacher)?;
        }
        for (student, course) in snapshot.enrollments {
            self.enroll(student, course)?;
        }
        for (teacher, course) in snapshot.assignments {
            self.assign_teacher(teacher, course)?;
        }
        Ok(())
    }

    /// Capture the full state in deterministic order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.catalog.students.values().cloned().collect(),
            self.catalog.courses.values().cloned().collect(),
            self.catalog.teachers.values().cloned().collect(),
            self.enrollments.pairs(),
            self.assignments.pairs(),
        )
    }

    /// Write the current state to `store`.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::Store` if the store rejects the write.
    pub fn save(&self, store: &dyn Persistence) -> Result<(), RegistrarError> {
        store.save(&self.snapshot())?;
        info!(pairs = self.enrollments.len(), "registrar saved");
        Ok(())
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    /// Register a new student with no enrollments.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::DuplicateId` if the ID is taken.
    pub fn add_student(
        &mut self,
        id: impl Into<StudentId>,
        name: impl Into<String>,
    ) -> Result<(), RegistrarError> {
        self.insert_student(Student::new(id.into(), name))
    }

    /// Register a new course. `None` capacity takes the configured default.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::DuplicateId` if the ID is taken.
    pub fn add_course(
        &mut self,
        id: impl Into<CourseId>,
        name: impl Into<String>,
        capacity: Option<u32>,
    ) -> Result<(), RegistrarError> {
        let capacity = capacity.unwrap_or(self.config.default_capacity);
        self.insert_course(Course::new(id.into(), name, capacity))
    }

    /// Register a new teacher with no assignments.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::DuplicateId` if the ID is taken.
    pub fn add_teacher(
        &mut self,
        id: impl Into<TeacherId>,
        name: impl Into<String>,
    ) -> Result<(), RegistrarError> {
        self.insert_teacher(Teacher::new(id.into(), name))
    }

    fn insert_student(&mut self, student: Student) -> Result<(), RegistrarError> {
        let id = student.id().clone();
        if !self.catalog.students.insert(id.clone(), student) {
            return Err(RegistrarError::duplicate(EntityKind::Student, id));
        }
        debug!(student = %id, "student added");
        Ok(())
    }

    fn insert_course(&mut self, course: Course) -> Result<(), RegistrarError> {
        let id = course.id().clone();
        let capacity = course.capacity();
        if !self.catalog.courses.insert(id.clone(), course) {
            return Err(RegistrarError::duplicate(EntityKind::Course, id));
        }
        debug!(course = %id, capacity, "course added");
        Ok(())
    }

    fn insert_teacher(&mut self, teacher: Teacher) -> Result<(), RegistrarError> {
        let id = teacher.id().clone();
        if !self.catalog.teachers.insert(id.clone(), teacher) {
            return Err(RegistrarError::duplicate(EntityKind::Teacher, id));
        }
        debug!(teacher = %id, "teacher added");
        Ok(())
    }

    /// Look up a student. Absence is a normal outcome.
    pub fn find_student(&self, id: impl Into<StudentId>) -> Option<&Student> {
        self.catalog.students.get(&id.into())
    }

    /// Look up a course. Absence is a normal outcome.
    pub fn find_course(&self, id: impl Into<CourseId>) -> Option<&Course> {
        self.catalog.courses.get(&id.into())
    }

    /// Look up a teacher. Absence is a normal outcome.
    pub fn find_teacher(&self, id: impl Into<TeacherId>) -> Option<&Teacher> {
        self.catalog.teachers.get(&id.into())
    }

    /// Remove a student and drop them from every course.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the student doesn't exist.
    pub fn remove_student(&mut self, id: impl Into<StudentId>) -> Result<Student, RegistrarError> {
        let id = id.into();
        if !self.catalog.students.contains(&id) {
            return Err(RegistrarError::not_found(EntityKind::Student, id));
        }

        self.cascade_remove_student(&id);
        let student = self
            .catalog
            .students
            .remove(&id)
            .ok_or_else(|| RegistrarError::not_found(EntityKind::Student, &id))?;

        debug!(student = %id, "student removed");
        Ok(student)
    }

    /// Remove a course, emptying its roster and its teacher assignments.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the course doesn't exist.
    pub fn remove_course(&mut self, id: impl Into<CourseId>) -> Result<Course, RegistrarError> {
        let id = id.into();
        if !self.catalog.courses.contains(&id) {
            return Err(RegistrarError::not_found(EntityKind::Course, id));
        }

        self.cascade_remove_course(&id);
        let course = self
            .catalog
            .courses
            .remove(&id)
            .ok_or_else(|| RegistrarError::not_found(EntityKind::Course, &id))?;

        debug!(course = %id, "course removed");
        Ok(course)
    }

    /// Remove a teacher and all of their course assignments.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::NotFound` if the teacher doesn't exist.
    pub fn remove_teacher(&mut self, id: impl Into<TeacherId>) -> Result<Teacher, RegistrarError> {
        let id = id.into();
        if !self.catalog.teachers.contains(&id) {
            return Err(RegistrarError::not_found(EntityKind::Teacher, id));
        }

        self.cascade_remove_teacher_assignments(&id);
        let teacher = self
            .catalog
            .teachers
            .remove(&id)
            .ok_or_else(|| RegistrarError::not_found(EntityKind::Teacher, &id))?;

        debug!(teacher = %id, "teacher removed");
        Ok(teacher)
    }

    /// Students in ID order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.catalog.students.values()
    }

    /// Courses in ID order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.catalog.courses.values()
    }

    /// Teachers in ID order.
    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.catalog.teachers.values()
    }

    /// Total number of (student, course) enrollments.
    pub fn enrollment_total(&self) -> usize {
        self.enrollments.len()
    }

    /// Audit every relational invariant.
    ///
    /// A violation means a registrar bug; commands never produce one.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        self.enrollments.audit().map_err(|d| defect(ENROLLMENT, d))?;
        self.assignments.audit().map_err(|d| defect(ASSIGNMENT, d))?;

        for student in self.enrollments.left_keys() {
            if !self.catalog.students.contains(student) {
                return Err(dangling(ENROLLMENT, EntityKind::Student, student));
            }
        }
        for course in self.enrollments.right_keys() {
            if !self.catalog.courses.contains(course) {
                return Err(dangling(ENROLLMENT, EntityKind::Course, course));
            }
        }
        for teacher in self.assignments.left_keys() {
            if !self.catalog.teachers.contains(teacher) {
                return Err(dangling(ASSIGNMENT, EntityKind::Teacher, teacher));
            }
        }
        for course in self.assignments.right_keys() {
            if !self.catalog.courses.contains(course) {
                return Err(dangling(ASSIGNMENT, EntityKind::Course, course));
            }
        }

        for course in self.catalog.courses.values() {
            let enrolled = self.enrollments.lefts(course.id()).len();
            if enrolled > course.capacity() as usize {
                return Err(InvariantViolation::OverCapacity {
                    course: course.id().clone(),
                    enrolled,
                    capacity: course.capacity(),
                });
            }
        }

        Ok(())
    }
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new(RegistrarConfig::default())
    }
}

fn defect(relation: &'static str, defect: RelationDefect) -> InvariantViolation {
    match defect {
        RelationDefect::Asymmetric { left, right } => {
            InvariantViolation::Asymmetric { relation, left, right }
        },
        RelationDefect::Duplicate { left, right } => {
            InvariantViolation::DuplicatePair { relation, left, right }
        },
    }
}

fn dangling(relation: &'static str, kind: EntityKind, id: impl ToString) -> InvariantViolation {
    InvariantViolation::DanglingReference { relation, kind, id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn add_rejects_duplicate_ids() {
        let mut registrar = Registrar::default();
        registrar.add_student("S001", "Ada").unwrap();

        let err = registrar.add_student("S001", "Grace").unwrap_err();
        assert!(matches!(err, RegistrarError::DuplicateId { kind: EntityKind::Student, .. }));
        assert_eq!(registrar.find_student("S001").map(Student::name), Some("Ada"));
    }

    #[test]
    fn add_course_uses_configured_default_capacity() {
        let mut registrar = Registrar::new(RegistrarConfig::default().with_default_capacity(7));
        registrar.add_course("CS101", "Intro", None).unwrap();
        registrar.add_course("CS201", "Data Structures", Some(2)).unwrap();

        assert_eq!(registrar.find_course("CS101").map(Course::capacity), Some(7));
        assert_eq!(registrar.find_course("CS201").map(Course::capacity), Some(2));
    }

    #[test]
    fn find_missing_is_none() {
        let registrar = Registrar::default();
        assert!(registrar.find_student("S404").is_none());
        assert!(registrar.find_course("CS404").is_none());
        assert!(registrar.find_teacher("T404").is_none());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut registrar = Registrar::default();
        assert!(matches!(
            registrar.remove_course("CS404"),
            Err(RegistrarError::NotFound { kind: EntityKind::Course, .. })
        ));
        assert!(matches!(
            registrar.remove_teacher("T404"),
            Err(RegistrarError::NotFound { kind: EntityKind::Teacher, .. })
        ));
    }

    #[test]
    fn initialize_without_store_seeds_demo_data() {
        let registrar = Registrar::initialize(RegistrarConfig::default(), None).unwrap();
        assert!(registrar.courses().count() > 0);
        assert!(registrar.teachers().count() > 0);
        assert!(registrar.verify_invariants().is_ok());
    }

    #[test]
    fn initialize_with_empty_store_seeds_demo_data() {
        let store = MemoryStore::new();
        let registrar = Registrar::initialize(RegistrarConfig::default(), Some(&store)).unwrap();
        assert_eq!(registrar.snapshot(), seed::demo_snapshot());
    }

    #[test]
    fn initialize_prefers_stored_snapshot() {
        let mut registrar = Registrar::default();
        registrar.add_student("S001", "Ada").unwrap();
        registrar.add_course("CS101", "Intro", Some(1)).unwrap();
        registrar.enroll("S001", "CS101").unwrap();

        let store = MemoryStore::new();
        registrar.save(&store).unwrap();

        let restored = Registrar::initialize(RegistrarConfig::default(), Some(&store)).unwrap();
        assert_eq!(restored.snapshot(), registrar.snapshot());
    }

    #[test]
    fn verify_invariants_flags_dangling_reference() {
        let mut registrar = Registrar::default();
        registrar.add_student("S001", "Ada").unwrap();
        registrar.add_course("CS101", "Intro", None).unwrap();
        registrar.enroll("S001", "CS101").unwrap();

        // Bypass the command path to simulate a bug.
        registrar.catalog.students.remove(&StudentId::from("S001"));

        assert!(matches!(
            registrar.verify_invariants(),
            Err(InvariantViolation::DanglingReference { kind: EntityKind::Student, .. })
        ));
    }

    #[test]
    fn verify_invariants_flags_over_capacity() {
        let mut registrar = Registrar::default();
        registrar.add_student("S001", "Ada").unwrap();
        registrar.add_course("CS101", "Intro", Some(0)).unwrap();

        // Bypass the capacity check to simulate a bug.
        registrar.enrollments.link("S001".into(), "CS101".into());

        assert!(matches!(registrar.verify_invariants(), Err(InvariantViolation::OverCapacity { .. })));
    }
}
