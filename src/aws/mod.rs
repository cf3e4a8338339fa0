//! AWS collaborators: session setup, S3 listing and CloudWatch metrics.
//!
//! [`AwsSession`] implements both [`crate::listing::ListingApi`] and
//! [`crate::metrics::MetricsProvider`]. The SDK is async; a current-thread runtime
//! owned by the session drives each request to completion before returning.

mod cloudwatch;
mod s3;
mod session;

pub use session::{
    AwsSession, DEFAULT_METRIC_WINDOW, DEFAULT_PROFILE, DEFAULT_REGION, SessionConfig, connect,
};
