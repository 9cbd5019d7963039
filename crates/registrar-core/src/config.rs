//! Registrar configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`Registrar`](crate::Registrar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarConfig {
    /// Capacity given to courses created without an explicit one.
    pub default_capacity: u32,
}

impl RegistrarConfig {
    /// Default seat limit for new courses.
    pub const DEFAULT_CAPACITY: u32 = 30;

    /// Override the default course capacity.
    #[must_use]
    pub fn with_default_capacity(mut self, capacity: u32) -> Self {
        self.default_capacity = capacity;
        self
    }
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self { default_capacity: Self::DEFAULT_CAPACITY }
    }
}
