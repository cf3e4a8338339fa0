//! Bucket metrics through CloudWatch `GetMetricStatistics`.
//!
//! S3 publishes storage metrics once a day, so the newest daily datapoint in the
//! lookback window is used.

use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{Datapoint, Dimension, Statistic};
use chrono::Utc;

use crate::error::MetricError;
use crate::metrics::{Metric, MetricsProvider};

use super::session::AwsSession;

const NAMESPACE: &str = "AWS/S3";
const PERIOD_SECS: i32 = 86_400;

/// One S3 storage metric and the storage type it is reported under.
#[derive(Debug, Clone, Copy)]
struct StorageMetric {
    name: &'static str,
    storage_type: &'static str,
}

const BUCKET_SIZE: StorageMetric = StorageMetric {
    name: "BucketSizeBytes",
    storage_type: "StandardStorage",
};

const OBJECT_COUNT: StorageMetric = StorageMetric {
    name: "NumberOfObjects",
    storage_type: "AllStorageTypes",
};

impl AwsSession {
    fn storage_metric(
        &self,
        container: &str,
        metric: StorageMetric,
    ) -> Result<Metric, MetricError> {
        let window = chrono::Duration::from_std(self.metric_window)
            .map_err(|e| MetricError::Request(e.to_string()))?;
        let end = Utc::now();
        let start = end - window;

        let request = self
            .cloudwatch
            .get_metric_statistics()
            .namespace(NAMESPACE)
            .metric_name(metric.name)
            .set_dimensions(Some(dimensions(container, metric)))
            .start_time(DateTime::from_secs(start.timestamp()))
            .end_time(DateTime::from_secs(end.timestamp()))
            .period(PERIOD_SECS)
            .statistics(Statistic::Sum);

        let output = self
            .runtime
            .block_on(request.send())
            .map_err(|e| MetricError::Request(DisplayErrorContext(&e).to_string()))?;

        latest_sum(metric.name, output.datapoints.unwrap_or_default())
    }
}

fn dimensions(container: &str, metric: StorageMetric) -> Vec<Dimension> {
    [("BucketName", container), ("StorageType", metric.storage_type)]
        .into_iter()
        .map(|(name, value)| Dimension::builder().name(name).value(value).build())
        .collect()
}

/// The `Sum` of the newest datapoint.
fn latest_sum(metric: &str, datapoints: Vec<Datapoint>) -> Result<Metric, MetricError> {
    let latest = datapoints
        .into_iter()
        .max_by_key(|dp| dp.timestamp.map(|t| t.secs()))
        .ok_or_else(|| MetricError::NoDatapoints {
            metric: metric.to_string(),
        })?;

    let value = latest.sum.ok_or_else(|| MetricError::MissingStatistic {
        metric: metric.to_string(),
        statistic: "Sum".to_string(),
    })?;

    Ok(Metric::new(value, latest.unit.map(|u| u.as_str().to_string())))
}

impl MetricsProvider for AwsSession {
    fn aggregate_size(&self, container: &str) -> Result<Metric, MetricError> {
        self.storage_metric(container, BUCKET_SIZE)
    }

    fn object_count(&self, container: &str) -> Result<Metric, MetricError> {
        self.storage_metric(container, OBJECT_COUNT)
    }
}
