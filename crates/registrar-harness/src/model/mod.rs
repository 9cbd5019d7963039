//! Reference model for model-based testing.
//!
//! The model is a deliberately naive registrar: flat lists scanned on every
//! call, no indexes. It captures WHAT the registrar must do and serves as
//! the oracle against which the real implementation is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Behavior not mechanism: Captures WHAT, not HOW
//! - Deterministic: Same inputs produce same outputs

pub mod operation;
mod world;

pub use operation::{
    ModelCourseId, ModelStudentId, ModelTeacherId, Operation, OperationError, OperationResult,
};
pub use world::{ModelWorld, ObservableState};
