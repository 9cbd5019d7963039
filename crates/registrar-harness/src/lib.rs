//! Testing harness for the course registrar.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and the real registrar
//! (via [`RealWorld`]), and their observable states are compared.
//!
//! # Scenarios
//!
//! [`Scenario`] turns a seed into an operation sequence, so a failing run can
//! be replayed exactly from its seed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod real;
pub mod scenario;

pub use model::{
    ModelCourseId, ModelStudentId, ModelTeacherId, ModelWorld, ObservableState, Operation,
    OperationError, OperationResult,
};
pub use real::RealWorld;
pub use scenario::{Divergence, Scenario, ScenarioReport};
