//! Demo baseline used when no store provides a snapshot.

use crate::{
    entity::{Course, Teacher},
    persistence::Snapshot,
};

/// Courses offered out of the box: (id, name, capacity).
const COURSES: &[(&str, &str, u32)] = &[
    ("CS101", "Introduction to Programming", 30),
    ("CS201", "Data Structures", 25),
    ("ENG101", "Academic Writing", 20),
    ("MATH101", "Calculus I", 40),
    ("PHYS101", "General Physics", 35),
];

/// Faculty out of the box: (id, name).
const TEACHERS: &[(&str, &str)] = &[
    ("T001", "Dr. Alan Turing"),
    ("T002", "Dr. Grace Hopper"),
    ("T003", "Dr. Emmy Noether"),
];

/// Who teaches what: (teacher, course).
const ASSIGNMENTS: &[(&str, &str)] = &[
    ("T001", "CS101"),
    ("T001", "CS201"),
    ("T002", "CS201"),
    ("T002", "ENG101"),
    ("T003", "MATH101"),
    ("T003", "PHYS101"),
];

/// Demo courses and teachers with no students enrolled.
pub fn demo_snapshot() -> Snapshot {
    Snapshot::new(
        Vec::new(),
        COURSES.iter().map(|(id, name, capacity)| Course::new((*id).into(), *name, *capacity)).collect(),
        TEACHERS.iter().map(|(id, name)| Teacher::new((*id).into(), *name)).collect(),
        Vec::new(),
        ASSIGNMENTS.iter().map(|(t, c)| ((*t).into(), (*c).into())).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Registrar, RegistrarConfig};

    #[test]
    fn demo_snapshot_replays_cleanly() {
        let registrar = Registrar::from_snapshot(RegistrarConfig::default(), demo_snapshot()).unwrap();

        assert_eq!(registrar.courses().count(), COURSES.len());
        assert_eq!(registrar.teachers().count(), TEACHERS.len());
        assert_eq!(registrar.course_teachers("CS201").unwrap().len(), 2);
        assert!(registrar.verify_invariants().is_ok());
    }

    #[test]
    fn demo_entities_are_in_id_order() {
        let snapshot = demo_snapshot();
        let ids: Vec<_> = snapshot.courses.iter().map(Course::id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
