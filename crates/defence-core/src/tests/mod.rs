//! Crate-level tests for the whole frame pipeline.
//!
//! - `determinism.rs`: same seed and inputs give the same frames
//! - `integration.rs`: end-to-end scenarios through [`Simulation`](crate::simulation::Simulation)
//! - `helpers.rs`: builders, state readers and a recording canvas

pub(crate) mod helpers;
mod integration;
