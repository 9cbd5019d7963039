//! Registrar tests

use registrar_core::{
    CborFileStore, EntityKind, MemoryStore, Persistence, Registrar, RegistrarConfig, RegistrarError,
    RosterEntry, SNAPSHOT_VERSION, ScheduleEntry, Snapshot, StoreError,
};

fn roster_ids(roster: &[RosterEntry]) -> Vec<&str> {
    roster.iter().map(|e| e.id.as_str()).collect()
}

fn schedule_ids(schedule: &[ScheduleEntry]) -> Vec<&str> {
    schedule.iter().map(|e| e.id.as_str()).collect()
}

fn with_students(ids: &[&str]) -> Registrar {
    let mut registrar = Registrar::default();
    for id in ids {
        registrar.add_student(*id, format!("Student {id}")).unwrap();
    }
    registrar
}

#[test]
fn new_registrar_is_empty() {
    let registrar = Registrar::default();
    assert_eq!(registrar.students().count(), 0);
    assert_eq!(registrar.courses().count(), 0);
    assert_eq!(registrar.teachers().count(), 0);
    assert_eq!(registrar.enrollment_total(), 0);
}

#[test]
fn capacity_scenario() {
    let mut registrar = with_students(&["S001", "S002", "S003"]);
    registrar.add_course("CS101", "Introduction to Programming", Some(2)).unwrap();

    registrar.enroll("S001", "CS101").unwrap();
    registrar.enroll("S002", "CS101").unwrap();

    let err = registrar.enroll("S003", "CS101").unwrap_err();
    assert!(matches!(err, RegistrarError::CourseFull { capacity: 2, .. }));

    registrar.drop_course("S001", "CS101").unwrap();
    registrar.enroll("S003", "CS101").unwrap();

    let roster = registrar.course_roster("CS101").unwrap();
    assert_eq!(roster_ids(&roster), vec!["S002", "S003"]);
    assert!(registrar.verify_invariants().is_ok());
}

#[test]
fn remove_course_clears_student_schedules() {
    let mut registrar = with_students(&["S002"]);
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.add_course("MATH101", "Calculus", None).unwrap();
    registrar.enroll("S002", "CS101").unwrap();
    registrar.enroll("S002", "MATH101").unwrap();

    let removed = registrar.remove_course("CS101").unwrap();
    assert_eq!(removed.id().as_str(), "CS101");

    let schedule = registrar.student_schedule("S002").unwrap();
    assert_eq!(schedule_ids(&schedule), vec!["MATH101"]);
    assert!(matches!(
        registrar.course_roster("CS101"),
        Err(RegistrarError::NotFound { kind: EntityKind::Course, .. })
    ));
    assert!(registrar.verify_invariants().is_ok());
}

#[test]
fn remove_student_clears_rosters() {
    let mut registrar = with_students(&["S001", "S002"]);
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.enroll("S001", "CS101").unwrap();
    registrar.enroll("S002", "CS101").unwrap();

    registrar.remove_student("S001").unwrap();

    let roster = registrar.course_roster("CS101").unwrap();
    assert_eq!(roster_ids(&roster), vec!["S002"]);
    assert!(matches!(
        registrar.student_schedule("S001"),
        Err(RegistrarError::NotFound { kind: EntityKind::Student, .. })
    ));
    assert_eq!(registrar.enrollment_total(), 1);
}

#[test]
fn remove_teacher_clears_assignments() {
    let mut registrar = Registrar::default();
    registrar.add_teacher("T001", "Turing").unwrap();
    registrar.add_teacher("T002", "Hopper").unwrap();
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.assign_teacher("T001", "CS101").unwrap();
    registrar.assign_teacher("T002", "CS101").unwrap();

    registrar.remove_teacher("T001").unwrap();

    let teachers = registrar.course_teachers("CS101").unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0].as_str(), "T002");
    assert!(registrar.verify_invariants().is_ok());
}

#[test]
fn remove_course_clears_teacher_schedules() {
    let mut registrar = Registrar::default();
    registrar.add_teacher("T001", "Turing").unwrap();
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.add_course("CS201", "Data Structures", None).unwrap();
    registrar.assign_teacher("T001", "CS101").unwrap();
    registrar.assign_teacher("T001", "CS201").unwrap();

    registrar.remove_course("CS101").unwrap();

    let schedule = registrar.teacher_schedule("T001").unwrap();
    assert_eq!(schedule_ids(&schedule), vec!["CS201"]);
}

#[test]
fn duplicate_enrollment_leaves_state_unchanged() {
    let mut registrar = with_students(&["S001"]);
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.enroll("S001", "CS101").unwrap();
    let before = registrar.snapshot();

    let err = registrar.enroll("S001", "CS101").unwrap_err();
    assert!(matches!(err, RegistrarError::AlreadyEnrolled { .. }));
    assert_eq!(registrar.snapshot(), before);
}

#[test]
fn drop_without_enrollment_leaves_state_unchanged() {
    let mut registrar = with_students(&["S001", "S002"]);
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.enroll("S002", "CS101").unwrap();
    let before = registrar.snapshot();

    let err = registrar.drop_course("S001", "CS101").unwrap_err();
    assert!(matches!(err, RegistrarError::NotEnrolled { .. }));
    assert_eq!(registrar.snapshot(), before);
}

#[test]
fn re_adding_removed_id_starts_clean() {
    let mut registrar = with_students(&["S001"]);
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.enroll("S001", "CS101").unwrap();

    registrar.remove_student("S001").unwrap();
    registrar.add_student("S001", "Returning").unwrap();

    assert!(registrar.student_schedule("S001").unwrap().is_empty());
    assert!(registrar.course_roster("CS101").unwrap().is_empty());
}

#[test]
fn queries_are_idempotent() {
    let mut registrar = with_students(&["S001", "S002"]);
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.enroll("S002", "CS101").unwrap();
    registrar.enroll("S001", "CS101").unwrap();

    assert_eq!(registrar.course_roster("CS101").unwrap(), registrar.course_roster("CS101").unwrap());
    assert_eq!(registrar.student_schedule("S001").unwrap(), registrar.student_schedule("S001").unwrap());
}

#[test]
fn snapshot_round_trip_preserves_order() {
    let mut registrar = with_students(&["S001", "S002", "S003"]);
    registrar.add_course("CS101", "Intro", None).unwrap();
    registrar.add_course("MATH101", "Calculus", None).unwrap();
    registrar.enroll("S003", "MATH101").unwrap();
    registrar.enroll("S001", "CS101").unwrap();
    registrar.enroll("S003", "CS101").unwrap();
    registrar.enroll("S002", "CS101").unwrap();
    registrar.drop_course("S003", "MATH101").unwrap();
    registrar.enroll("S003", "MATH101").unwrap();

    let store = MemoryStore::new();
    registrar.save(&store).unwrap();
    let restored = Registrar::initialize(RegistrarConfig::default(), Some(&store)).unwrap();

    assert_eq!(
        roster_ids(&restored.course_roster("CS101").unwrap()),
        vec!["S001", "S003", "S002"]
    );
    assert_eq!(
        schedule_ids(&restored.student_schedule("S003").unwrap()),
        vec!["CS101", "MATH101"]
    );
    assert_eq!(restored.generate_course_report(), registrar.generate_course_report());
}

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = CborFileStore::new(dir.path().join("registry.cbor"));

    let mut registrar = Registrar::initialize(RegistrarConfig::default(), Some(&store)).unwrap();
    registrar.add_student("S001", "Ada").unwrap();
    registrar.enroll("S001", "CS101").unwrap();
    registrar.save(&store).unwrap();

    let restored = Registrar::initialize(RegistrarConfig::default(), Some(&store)).unwrap();
    assert_eq!(restored.snapshot(), registrar.snapshot());
    assert_eq!(restored.generate_enrollment_report(), registrar.generate_enrollment_report());
}

#[test]
fn inconsistent_snapshot_is_rejected() {
    let mut registrar = with_students(&["S001"]);
    registrar.add_course("CS101", "Intro", Some(1)).unwrap();
    let mut snapshot = registrar.snapshot();

    snapshot.enrollments.push(("S404".into(), "CS101".into()));
    let err = Registrar::from_snapshot(RegistrarConfig::default(), snapshot).unwrap_err();
    assert!(matches!(err, RegistrarError::NotFound { kind: EntityKind::Student, .. }));
}

#[test]
fn unknown_snapshot_version_is_rejected() {
    let mut registrar = with_students(&["S001"]);
    registrar.add_course("CS101", "Intro", Some(1)).unwrap();
    registrar.enroll("S001", "CS101").unwrap();

    let mut snapshot = registrar.snapshot();
    snapshot.version = SNAPSHOT_VERSION + 41;
    let store = MemoryStore::new();
    store.save(&snapshot).unwrap();

    let err = Registrar::initialize(RegistrarConfig::default(), Some(&store)).unwrap_err();
    assert!(matches!(err, RegistrarError::Store(StoreError::Decode(_))));
    assert!(err.is_fatal());

    let err = Registrar::from_snapshot(RegistrarConfig::default(), snapshot).unwrap_err();
    assert!(matches!(err, RegistrarError::Store(StoreError::Decode(_))));
}

#[test]
fn unknown_version_in_file_store_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = CborFileStore::new(dir.path().join("registry.cbor"));
    let mut snapshot = Registrar::default().snapshot();
    snapshot.version = SNAPSHOT_VERSION + 1;
    store.save(&snapshot).unwrap();

    let err = Registrar::initialize(RegistrarConfig::default(), Some(&store)).unwrap_err();
    assert!(matches!(err, RegistrarError::Store(StoreError::Decode(_))));
}

#[test]
fn over_capacity_snapshot_is_rejected() {
    let mut registrar = with_students(&["S001", "S002"]);
    registrar.add_course("CS101", "Intro", Some(1)).unwrap();
    let mut snapshot = registrar.snapshot();

    snapshot.enrollments.push(("S001".into(), "CS101".into()));
    snapshot.enrollments.push(("S002".into(), "CS101".into()));
    let err = Registrar::from_snapshot(RegistrarConfig::default(), snapshot).unwrap_err();
    assert!(matches!(err, RegistrarError::CourseFull { .. }));
}

/// Store that always fails, to check errors surface as fatal.
struct BrokenStore;

impl Persistence for BrokenStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Err(StoreError::Decode("broken".to_string()))
    }

    fn save(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        Err(std::io::Error::other("disk full").into())
    }
}

#[test]
fn store_failures_surface_as_fatal_errors() {
    let err = Registrar::initialize(RegistrarConfig::default(), Some(&BrokenStore)).unwrap_err();
    assert!(err.is_fatal());

    let err = Registrar::default().save(&BrokenStore).unwrap_err();
    assert!(matches!(err, RegistrarError::Store(_)));
}
