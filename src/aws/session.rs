//! Session configuration and client creation.

use std::time::Duration;

use aws_config::default_provider::region::DefaultRegionChain;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::error::DisplayErrorContext;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::error::SessionError;

pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_REGION: &str = "ap-southeast-2";
pub const DEFAULT_METRIC_WINDOW: Duration = Duration::from_secs(2 * 24 * 60 * 60);

/// Configuration for AWS access.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Shared-config profile name
    pub profile: String,

    /// Region override; otherwise the profile/environment chain, then `DEFAULT_REGION`
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// Lookback window for CloudWatch metric statistics
    pub metric_window: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            region: None,
            endpoint: None,
            metric_window: DEFAULT_METRIC_WINDOW,
        }
    }
}

impl SessionConfig {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            ..Default::default()
        }
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the CloudWatch lookback window.
    pub fn with_metric_window(mut self, window: Duration) -> Self {
        self.metric_window = window;
        self
    }
}

/// Authenticated clients plus the runtime that drives them.
///
/// All calls block the current thread; requests are never overlapped.
pub struct AwsSession {
    pub(super) runtime: Runtime,
    pub(super) s3: aws_sdk_s3::Client,
    pub(super) cloudwatch: aws_sdk_cloudwatch::Client,
    pub(super) metric_window: Duration,
}

/// Resolve credentials for the configured profile and build the clients.
pub fn connect(config: &SessionConfig) -> Result<AwsSession, SessionError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let sdk_config = runtime.block_on(load_sdk_config(config));

    let provider =
        sdk_config
            .credentials_provider()
            .ok_or_else(|| SessionError::NoCredentialsProvider {
                profile: config.profile.clone(),
            })?;
    runtime
        .block_on(provider.provide_credentials())
        .map_err(|e| SessionError::Credentials {
            profile: config.profile.clone(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

    debug!(
        profile = %config.profile,
        region = ?sdk_config.region(),
        endpoint = ?config.endpoint,
        "Resolved AWS credentials"
    );

    // Path-style addressing for custom endpoints (LocalStack)
    let s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config);
    let s3_config = if config.endpoint.is_some() {
        s3_config_builder.force_path_style(true).build()
    } else {
        s3_config_builder.build()
    };

    Ok(AwsSession {
        s3: aws_sdk_s3::Client::from_conf(s3_config),
        cloudwatch: aws_sdk_cloudwatch::Client::new(&sdk_config),
        metric_window: config.metric_window,
        runtime,
    })
}

async fn load_sdk_config(config: &SessionConfig) -> SdkConfig {
    let loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(&config.profile);

    let loader = match &config.region {
        Some(region) => loader.region(Region::new(region.clone())),
        None => loader.region(
            RegionProviderChain::first_try(
                DefaultRegionChain::builder()
                    .profile_name(&config.profile)
                    .build(),
            )
            .or_else(Region::new(DEFAULT_REGION)),
        ),
    };

    let loader = match &config.endpoint {
        Some(endpoint) => loader.endpoint_url(endpoint),
        None => loader,
    };

    loader.load().await
}
