//! Aggregate bucket metrics
//!
//! Metric retrieval is best effort: any failure is logged and shown as zero.

use serde::Serialize;
use tracing::warn;

use crate::error::MetricError;

/// A single aggregate value with its unit, if the backend reported one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub value: f64,
    pub unit: Option<String>,
}

impl Metric {
    pub fn new(value: f64, unit: Option<String>) -> Self {
        Self { value, unit }
    }

    /// The value shown when retrieval fails.
    pub fn zero() -> Self {
        Self {
            value: 0.0,
            unit: None,
        }
    }

    /// The value truncated to a whole number for display.
    pub fn whole(&self) -> u64 {
        if self.value.is_finite() && self.value > 0.0 {
            self.value as u64
        } else {
            0
        }
    }
}

/// Source of per-bucket aggregate metrics.
pub trait MetricsProvider {
    /// Total stored bytes.
    fn aggregate_size(&self, container: &str) -> Result<Metric, MetricError>;

    /// Number of stored objects.
    fn object_count(&self, container: &str) -> Result<Metric, MetricError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketMetrics {
    pub size: Metric,
    pub object_count: Metric,
}

/// Fetch both metrics, substituting zero for any that fail.
pub fn collect_metrics<M: MetricsProvider + ?Sized>(
    provider: &M,
    container: &str,
) -> BucketMetrics {
    BucketMetrics {
        size: or_zero(provider.aggregate_size(container), container, "size"),
        object_count: or_zero(provider.object_count(container), container, "object_count"),
    }
}

fn or_zero(result: Result<Metric, MetricError>, container: &str, metric: &str) -> Metric {
    result.unwrap_or_else(|e| {
        warn!(
            container = container,
            metric = metric,
            error = %e,
            "Metric unavailable, showing zero"
        );
        Metric::zero()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FixedMetrics;

    #[test]
    fn test_collect_metrics_passes_values_through() {
        let provider = FixedMetrics {
            size: Some(Metric::new(1536.0, Some("Bytes".to_string()))),
            object_count: Some(Metric::new(12.0, Some("Count".to_string()))),
        };
        let metrics = collect_metrics(&provider, "bkt");
        assert_eq!(metrics.size.whole(), 1536);
        assert_eq!(metrics.size.unit.as_deref(), Some("Bytes"));
        assert_eq!(metrics.object_count.whole(), 12);
    }

    #[test]
    fn test_each_metric_falls_back_independently() {
        let provider = FixedMetrics {
            size: None,
            object_count: Some(Metric::new(3.0, None)),
        };
        let metrics = collect_metrics(&provider, "bkt");
        assert_eq!(metrics.size, Metric::zero());
        assert_eq!(metrics.object_count.whole(), 3);

        let metrics = collect_metrics(&FixedMetrics::default(), "bkt");
        assert_eq!(metrics.size, Metric::zero());
        assert_eq!(metrics.object_count, Metric::zero());
    }

    #[test]
    fn test_whole_truncates() {
        assert_eq!(Metric::new(10.9, None).whole(), 10);
        assert_eq!(Metric::new(-1.0, None).whole(), 0);
        assert_eq!(Metric::new(f64::NAN, None).whole(), 0);
    }
}
