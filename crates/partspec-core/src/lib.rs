//! partspec-core - Date-range-driven partition-path expansion
//!
//! Pure logic, no I/O: callers supply the territory catalog (usually by
//! listing storage) and receive the expanded path set.

pub mod date;
pub mod expand;
pub mod layout;

pub use date::{resolve, resolve_on, Role};
pub use expand::{expand_partition_paths, expand_partition_paths_on};
pub use layout::PathLayout;
