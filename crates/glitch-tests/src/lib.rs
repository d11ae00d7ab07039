//! Integration tests for the glitch crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between `glitch-core` and `glitch-ops`: chained effects, determinism
//! under a seeded random source, and conservation properties that hold
//! across whole effect pipelines.
