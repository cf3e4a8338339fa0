//! Error types for s3tree
//!
//! - [`SessionError`]: credential/profile resolution, fatal before any listing
//! - [`ListingError`]: a failed page of a listing, fatal to the whole traversal
//! - [`MetricError`]: a failed metric query, recovered as a zero value by the caller
//! - [`Error`]: top-level error returned to the binary

use thiserror::Error;

/// Failure to build an authenticated session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The async runtime driving the SDK could not be started
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// No credentials provider could be configured for the profile
    #[error("no credentials provider configured for profile '{profile}'")]
    NoCredentialsProvider { profile: String },

    /// The credential chain for the profile failed to resolve
    #[error("could not resolve credentials for profile '{profile}': {message}")]
    Credentials { profile: String, message: String },
}

/// Failure of the paginated listing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// A page request failed
    #[error("listing {container}/{prefix} failed on page {page}: {message}")]
    Request {
        container: String,
        prefix: String,
        page: usize,
        message: String,
    },

    /// A group entry did not extend the prefix it was listed under
    #[error("listing returned prefix '{child}' which does not descend from '{parent}'")]
    NonDescendingPrefix { parent: String, child: String },
}

/// Failure to retrieve an aggregate metric.
#[derive(Error, Debug)]
pub enum MetricError {
    #[error("metric request failed: {0}")]
    Request(String),

    #[error("no datapoints returned for {metric}")]
    NoDatapoints { metric: String },

    #[error("datapoint for {metric} carries no {statistic} value")]
    MissingStatistic { metric: String, statistic: String },
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error("error writing output: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_error_message_names_location() {
        let err = ListingError::Request {
            container: "bkt".to_string(),
            prefix: "a/".to_string(),
            page: 2,
            message: "AccessDenied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "listing bkt/a/ failed on page 2: AccessDenied"
        );
    }

    #[test]
    fn test_listing_error_is_transparent_at_top_level() {
        let err: Error = ListingError::NonDescendingPrefix {
            parent: "a/".to_string(),
            child: "a/".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Listing(_)));
        assert_eq!(
            err.to_string(),
            "listing returned prefix 'a/' which does not descend from 'a/'"
        );
    }
}
