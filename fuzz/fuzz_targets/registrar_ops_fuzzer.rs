//! Fuzz target for registrar command sequences
//!
//! # Strategy
//!
//! - Arbitrary operation sequences folded into a small ID space so adds,
//!   removes and relation commands collide constantly
//! - Arbitrary default capacity, including zero
//! - Every step applied to the reference model and the real registrar
//!
//! # Invariants
//!
//! - Model and registrar return the same result for every operation
//! - Observable state matches after every operation
//! - `verify_invariants` passes after every operation
//! - Snapshot restore reproduces the final state exactly

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use registrar_core::Registrar;
use registrar_harness::{ModelWorld, Operation, RealWorld};

/// Folded ID space; small enough that collisions dominate.
const ID_SPACE: u8 = 8;

/// Largest explicit capacity after folding.
const MAX_CAPACITY: u8 = 4;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    default_capacity: u8,
    ops: Vec<Operation>,
}

fuzz_target!(|input: FuzzInput| {
    let default_capacity = u32::from(input.default_capacity % (MAX_CAPACITY + 1));
    let mut model = ModelWorld::new(default_capacity);
    let mut real = RealWorld::new(default_capacity);

    for op in input.ops {
        let op = op.normalized(ID_SPACE, MAX_CAPACITY);

        let model_result = model.apply(&op);
        let real_result = real.apply(&op);
        assert_eq!(model_result, real_result, "result divergence on {op:?}");
        assert_eq!(model.observable_state(), real.observable_state(), "state divergence on {op:?}");

        if let Err(violation) = real.registrar().verify_invariants() {
            panic!("invariant violated after {op:?}: {violation}");
        }
    }

    let registrar = real.registrar();
    let restored = Registrar::from_snapshot(*registrar.config(), registrar.snapshot())
        .unwrap_or_else(|e| panic!("own snapshot rejected: {e}"));
    assert_eq!(restored.snapshot(), registrar.snapshot());
});
