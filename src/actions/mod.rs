//! File actions module.
//!
//! Currently a single action: removing redundant duplicate copies, keeping
//! the lexicographically first path of every group.
//!
//! ```no_run
//! use dupscan::actions::plan_removal;
//! # let groups = Vec::new();
//! for plan in plan_removal(&groups) {
//!     println!("keep {} / delete {}", plan.keep.display(), plan.delete.len());
//! }
//! ```

pub mod remove;

pub use remove::{
    plan_removal, remove_duplicates, RemovalPlan, RemovalReport, RemoveError, RemoveErrors,
};
