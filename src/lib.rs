//! s3tree - the prefix hierarchy of an S3 bucket as an ASCII tree

pub mod aws;
pub mod entry;
pub mod error;
pub mod listing;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod prompt;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use entry::{Entry, ListingPage, PageRequest};
pub use error::{Error, ListingError, MetricError, Result, SessionError};
pub use listing::{EntryFilter, Listing, ListingApi, list};
pub use metrics::{BucketMetrics, Metric, MetricsProvider, collect_metrics};
pub use output::{OutputConfig, StreamingFormatter, print_json};
pub use tree::{
    BucketTree, TreeBuilder, TreeLine, TreeNode, TreeOutput, TreeWalker, WalkSummary,
    WalkerConfig,
};
