//! Grid storage and initialization

mod field;
pub mod patterns;
mod store;

// Re-export main types
pub use field::{cell_count, Grid};
pub use patterns::{initialize, initialize_from_config};
pub use store::GridStore;
