//! Typed structs for every OpenML wire message kind.
//!
//! Field names follow the wire schema; the few deliberate mismatches kept
//! for compatibility (`EvaluationScore::function`, `RunReset::run_id`) are
//! flagged as renames in the mapping table in [`crate::bindings`].

pub mod common;
pub mod data;
pub mod implementation;
pub mod run;
pub mod task;
