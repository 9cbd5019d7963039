//! Registrar shared between callers.
//!
//! One mutex guards the catalog and both relations together, so each
//! command (including the two-sided enroll/drop write) is a single critical
//! section.

use std::sync::{Arc, Mutex};

use crate::{error::RegistrarError, registrar::Registrar};

/// Cloneable handle to a registrar behind a single lock.
#[derive(Debug, Clone)]
pub struct SharedRegistrar {
    inner: Arc<Mutex<Registrar>>,
}

impl SharedRegistrar {
    /// Wrap a registrar.
    pub fn new(registrar: Registrar) -> Self {
        Self { inner: Arc::new(Mutex::new(registrar)) }
    }

    /// Run `f` with exclusive access.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or `RegistrarError::Poisoned` if a
    /// previous holder panicked.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut Registrar) -> Result<T, RegistrarError>,
    ) -> Result<T, RegistrarError> {
        let mut guard = self.inner.lock().map_err(|_| RegistrarError::Poisoned)?;
        f(&mut *guard)
    }

    /// Run a read-only `f`.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::Poisoned` if a previous holder panicked.
    pub fn read<T>(&self, f: impl FnOnce(&Registrar) -> T) -> Result<T, RegistrarError> {
        let guard = self.inner.lock().map_err(|_| RegistrarError::Poisoned)?;
        Ok(f(&*guard))
    }
}

impl From<Registrar> for SharedRegistrar {
    fn from(registrar: Registrar) -> Self {
        Self::new(registrar)
    }
}
