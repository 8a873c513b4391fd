//! Edge case integration tests for the safefs CLI.
//!
//! These tests cover permission bits and unusual paths and contents.

#[path = "../common/mod.rs"]
mod common;


#[path = "edge_cases/boundary_cases.rs"]
mod boundary_cases;
