//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod compare;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use compare::{execute_compare, parse_columns, resolve_output_path, validate_args};
pub use models::CompareArgs;
pub use utils::{display_units, display_version};
