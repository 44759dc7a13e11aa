//! # objdictgen Bench
//!
//! Benchmarking utilities for objdictgen performance testing.

pub mod nodes;
