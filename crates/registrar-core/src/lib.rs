//! Course registration registry.
//!
//! Tracks students, courses and teachers and the enrollment relation between
//! students and courses, enforcing seat limits, ID uniqueness and roster /
//! schedule consistency.
//!
//! ## Architecture
//!
//! ```text
//! registrar-core
//!   ├─ Registrar         (facade: commands, queries, initialization)
//!   ├─ Catalog           (ID -> record tables)
//!   ├─ Relation          (bidirectional many-to-many index)
//!   ├─ enrollment        (enroll / drop / assign / cascade)
//!   ├─ query + report    (rosters, schedules, summaries)
//!   └─ Persistence       (optional load/save capability)
//! ```
//!
//! # Invariants
//!
//! - Mirror: a course is on a student's schedule iff the student is on the
//!   course's roster
//! - Capacity: no roster ever exceeds its course's capacity
//! - No dangling IDs: removing an entity removes every pair naming it

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
mod config;
mod enrollment;
mod entity;
mod error;
mod id;
pub mod persistence;
mod query;
mod registrar;
pub mod relation;
mod report;
pub mod seed;
mod shared;

pub use config::RegistrarConfig;
pub use entity::{Course, Student, Teacher};
pub use error::{InvariantViolation, RegistrarError, StoreError};
pub use id::{CourseId, EntityKind, StudentId, TeacherId};
pub use persistence::{CborFileStore, MemoryStore, Persistence, SNAPSHOT_VERSION, Snapshot};
pub use query::{RosterEntry, ScheduleEntry};
pub use registrar::Registrar;
pub use report::{
    CourseFill, CourseReport, EnrollmentReport, StudentLoad, TeacherLoad, TeacherReport,
};
pub use shared::SharedRegistrar;
