//! Core slide records and their invariants.

pub mod errors;
pub mod model;
