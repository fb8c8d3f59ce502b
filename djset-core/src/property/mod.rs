//! Property-based tests for partitions.
//!
//! Checks unions and spatial builds against a breadth-first-search oracle,
//! validates forest invariants after arbitrary edge sequences, and confirms
//! that bulk edge insertion agrees with the equivalent pairwise unions.

mod equivalence;
mod oracle;
mod strategies;
mod structural;
mod types;
