//! Pluggable persistence.
//!
//! The registrar never depends on a concrete backend. It hands a
//! [`Snapshot`] to whatever [`Persistence`] the caller supplies, and runs
//! fine with none at all.

use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    entity::{Course, Student, Teacher},
    error::StoreError,
    id::{CourseId, StudentId, TeacherId},
};

/// Snapshot layout version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Full registrar state in replay order.
///
/// Entities are ordered by ID. Pairs are in global link order so replaying
/// them reproduces every roster and schedule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Layout version.
    pub version: u32,
    /// All students.
    pub students: Vec<Student>,
    /// All courses.
    pub courses: Vec<Course>,
    /// All teachers.
    pub teachers: Vec<Teacher>,
    /// (student, course) enrollments.
    pub enrollments: Vec<(StudentId, CourseId)>,
    /// (teacher, course) assignments.
    pub assignments: Vec<(TeacherId, CourseId)>,
}

impl Snapshot {
    /// Build a snapshot at the current layout version.
    pub fn new(
        students: Vec<Student>,
        courses: Vec<Course>,
        teachers: Vec<Teacher>,
        enrollments: Vec<(StudentId, CourseId)>,
        assignments: Vec<(TeacherId, CourseId)>,
    ) -> Self {
        Self { version: SNAPSHOT_VERSION, students, courses, teachers, enrollments, assignments }
    }
}

/// Storage capability for registrar snapshots.
pub trait Persistence {
    /// Load the stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// In-process store holding at most one snapshot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(())
    }
}

/// Single-file CBOR store.
///
/// Writes go to a sibling temp file which is synced to disk and then renamed
/// over the target, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct CborFileStore {
    path: PathBuf,
}

impl CborFileStore {
    /// Store snapshots at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make the rename durable.
    #[cfg(unix)]
    fn sync_parent(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            File::open(dir)?.sync_all()?;
        }
        Ok(())
    }

    /// Directories can't be opened for sync here.
    #[cfg(not(unix))]
    fn sync_parent(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persistence for CborFileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot =
            ciborium::from_reader(bytes.as_slice()).map_err(|e| StoreError::Decode(e.to_string()))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot loaded");
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        ciborium::into_writer(snapshot, &mut buf).map_err(|e| StoreError::Encode(e.to_string()))?;

        let temp = self.temp_path();
        let mut file = File::create(&temp)?;
        file.write_all(&buf)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp, &self.path)?;
        self.sync_parent()?;

        debug!(path = %self.path.display(), bytes = buf.len(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot::new(
            vec![Student::new("S001".into(), "Ada")],
            vec![Course::new("CS101".into(), "Intro", 2)],
            vec![Teacher::new("T001".into(), "Knuth")],
            vec![("S001".into(), "CS101".into())],
            vec![("T001".into(), "CS101".into())],
        )
    }

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn memory_store_returns_last_save() {
        let store = MemoryStore::new();
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CborFileStore::new(dir.path().join("registry.cbor"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.cbor");

        CborFileStore::new(&path).save(&sample()).unwrap();
        let loaded = CborFileStore::new(&path).load().unwrap();

        assert_eq!(loaded, Some(sample()));
        assert!(!dir.path().join("registry.cbor.tmp").exists());
    }

    #[test]
    fn file_store_save_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = CborFileStore::new(dir.path().join("registry.cbor"));
        store.save(&sample()).unwrap();

        let empty = Snapshot::new(vec![], vec![], vec![], vec![], vec![]);
        store.save(&empty).unwrap();

        assert_eq!(store.load().unwrap(), Some(empty));
        assert!(!dir.path().join("registry.cbor.tmp").exists());
    }

    #[test]
    fn file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.cbor");
        fs::write(&path, b"not cbor at all").unwrap();

        let err = CborFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn file_store_keeps_version_as_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.cbor");
        let mut snapshot = sample();
        snapshot.version = SNAPSHOT_VERSION + 1;
        CborFileStore::new(&path).save(&snapshot).unwrap();

        let loaded = CborFileStore::new(&path).load().unwrap();
        assert_eq!(loaded.map(|s| s.version), Some(SNAPSHOT_VERSION + 1));
    }
}
