//! Seeded scenarios.
//!
//! A scenario is a seed plus a length. The seed drives a `ChaCha8` stream
//! whose bytes are decoded into [`Operation`]s with `arbitrary`, so any
//! failure reproduces from the seed alone.

use arbitrary::{Arbitrary, Unstructured};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::{
    model::{ModelWorld, ObservableState, Operation, OperationResult},
    real::RealWorld,
};

/// Bytes of entropy drawn per requested operation.
const BYTES_PER_OP: usize = 8;

/// A reproducible operation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    /// RNG seed.
    pub seed: u64,
    /// Number of operations to generate.
    pub length: usize,
    /// IDs are folded into `0..id_space`.
    pub id_space: u8,
    /// Explicit capacities are folded into `0..=max_capacity`.
    pub max_capacity: u8,
    /// Capacity for courses added without one.
    pub default_capacity: u32,
}

/// Outcome of a scenario where model and registrar agreed throughout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Operations applied.
    pub applied: usize,
    /// Operations that succeeded.
    pub succeeded: usize,
    /// Final observable state (identical on both sides).
    pub final_state: ObservableState,
}

/// First step where model and registrar disagreed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Zero-based step index.
    pub step: usize,
    /// Operation applied at that step.
    pub op: Operation,
    /// Model outcome.
    pub model: OperationResult,
    /// Registrar outcome.
    pub real: OperationResult,
    /// Whether observable states also differed.
    pub state_mismatch: bool,
}

impl Scenario {
    /// Scenario with a small ID space so operations collide often.
    pub fn new(seed: u64, length: usize) -> Self {
        Self { seed, length, id_space: 6, max_capacity: 3, default_capacity: 2 }
    }

    /// Decode the operation sequence for this seed.
    ///
    /// May return fewer than `length` operations if the byte stream runs
    /// dry mid-decode.
    pub fn operations(&self) -> Vec<Operation> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut bytes = vec![0u8; self.length.saturating_mul(BYTES_PER_OP)];
        rng.fill_bytes(&mut bytes);

        let mut u = Unstructured::new(&bytes);
        let mut ops = Vec::with_capacity(self.length);
        while ops.len() < self.length {
            match Operation::arbitrary(&mut u) {
                Ok(op) => ops.push(op.normalized(self.id_space, self.max_capacity)),
                Err(_) => break,
            }
        }
        ops
    }

    /// Run the scenario against model and registrar in lockstep.
    ///
    /// # Errors
    ///
    /// Returns the first [`Divergence`] in result or observable state.
    pub fn run(&self) -> Result<ScenarioReport, Divergence> {
        let mut model = ModelWorld::new(self.default_capacity);
        let mut real = RealWorld::new(self.default_capacity);
        let mut succeeded = 0;

        let ops = self.operations();
        for (step, op) in ops.iter().enumerate() {
            let model_result = model.apply(op);
            let real_result = real.apply(op);
            let state_mismatch = model.observable_state() != real.observable_state();

            if model_result != real_result || state_mismatch {
                return Err(Divergence {
                    step,
                    op: op.clone(),
                    model: model_result,
                    real: real_result,
                    state_mismatch,
                });
            }
            if model_result.is_ok() {
                succeeded += 1;
            }
        }

        Ok(ScenarioReport { applied: ops.len(), succeeded, final_state: model.observable_state() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_respect_bounds() {
        let scenario = Scenario::new(7, 200);
        for op in scenario.operations() {
            assert_eq!(op.clone().normalized(scenario.id_space, scenario.max_capacity), op);
        }
    }

    #[test]
    fn zero_length_scenario_is_empty() {
        let report = Scenario::new(1, 0).run().unwrap();
        assert_eq!(report.applied, 0);
        assert!(report.final_state.course_rosters.is_empty());
    }
}
