//! Fuzz target for snapshot decoding and replay
//!
//! # Strategy
//!
//! - Raw bytes decoded as a CBOR snapshot (most inputs fail to decode)
//! - Structured snapshots built with `arbitrary` over a tiny ID alphabet, so
//!   replay hits duplicates, dangling IDs and over-full courses
//!
//! # Invariants
//!
//! - NEVER panic on malformed input
//! - A snapshot is either rejected or yields a registrar that passes
//!   `verify_invariants`

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use registrar_core::{Course, Registrar, RegistrarConfig, Snapshot, Student, Teacher};

#[derive(Debug, Arbitrary)]
enum FuzzInput {
    Raw(Vec<u8>),
    Structured(FuzzSnapshot),
}

#[derive(Debug, Arbitrary)]
struct FuzzSnapshot {
    students: Vec<u8>,
    courses: Vec<(u8, u8)>,
    teachers: Vec<u8>,
    enrollments: Vec<(u8, u8)>,
    assignments: Vec<(u8, u8)>,
}

fn key(prefix: char, n: u8) -> String {
    format!("{prefix}{}", n % 6)
}

impl FuzzSnapshot {
    fn build(&self) -> Snapshot {
        Snapshot::new(
            self.students.iter().map(|&s| Student::new(key('S', s).into(), "s")).collect(),
            self.courses
                .iter()
                .map(|&(c, cap)| Course::new(key('C', c).into(), "c", u32::from(cap % 4)))
                .collect(),
            self.teachers.iter().map(|&t| Teacher::new(key('T', t).into(), "t")).collect(),
            self.enrollments.iter().map(|&(s, c)| (key('S', s).into(), key('C', c).into())).collect(),
            self.assignments.iter().map(|&(t, c)| (key('T', t).into(), key('C', c).into())).collect(),
        )
    }
}

fuzz_target!(|input: FuzzInput| {
    let snapshot = match input {
        FuzzInput::Raw(bytes) => match ciborium::from_reader::<Snapshot, _>(bytes.as_slice()) {
            Ok(snapshot) => snapshot,
            Err(_) => return,
        },
        FuzzInput::Structured(s) => s.build(),
    };

    if let Ok(registrar) = Registrar::from_snapshot(RegistrarConfig::default(), snapshot) {
        if let Err(violation) = registrar.verify_invariants() {
            panic!("accepted snapshot breaks invariants: {violation}");
        }
    }
});
