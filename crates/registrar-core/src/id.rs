//! Entity identifiers.
//!
//! IDs are assigned by the caller and never change. Each entity kind has its
//! own newtype so a course ID can't be passed where a student ID is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw ID.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Student identifier (e.g. `S001`).
    StudentId
);

entity_id!(
    /// Course identifier (e.g. `CS101`).
    CourseId
);

entity_id!(
    /// Teacher identifier (e.g. `T001`).
    TeacherId
);

/// The kind of entity an error or lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A student record.
    Student,
    /// A course record.
    Course,
    /// A teacher record.
    Teacher,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => f.write_str("student"),
            Self::Course => f.write_str("course"),
            Self::Teacher => f.write_str("teacher"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_raw_value() {
        assert_eq!(StudentId::new("S001").to_string(), "S001");
        assert_eq!(CourseId::from("CS101").as_str(), "CS101");
    }

    #[test]
    fn ids_order_lexicographically() {
        let mut ids = vec![CourseId::from("MATH101"), CourseId::from("CS201"), CourseId::from("CS101")];
        ids.sort();
        assert_eq!(ids, vec![CourseId::from("CS101"), CourseId::from("CS201"), CourseId::from("MATH101")]);
    }

    #[test]
    fn entity_kind_display() {
        assert_eq!(EntityKind::Teacher.to_string(), "teacher");
    }
}
