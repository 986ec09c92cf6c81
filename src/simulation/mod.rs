//! Random group generation for benchmarks and stress-style testing.

pub mod group_gen;
