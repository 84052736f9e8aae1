//! Family-graph domain core.
//!
//! Pure reconstruction and search over person records, the mutation engine
//! that keeps the graph invariants, and the storage traits the outer layers
//! implement. No I/O happens here beyond calls through those traits.

pub mod activity;
pub mod error;
pub mod graph;
pub mod memory;
pub mod mutation;
pub mod person;
pub mod store;
pub mod tree;
pub mod types;
