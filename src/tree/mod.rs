//! Bucket tree walking
//!
//! `TreeWalker` lists one level at a time and streams entries to a `TreeOutput`.
//! Two outputs are provided:
//!
//! - `StreamingFormatter` (in `output`): prints each line as it is found
//! - `TreeBuilder`: materializes a nested `TreeNode` tree, required for JSON output

mod builder;
mod config;
mod walker;

pub use builder::{BucketTree, TreeBuilder, TreeNode};
pub use config::WalkerConfig;
pub use walker::{TreeLine, TreeOutput, TreeWalker, WalkSummary};
