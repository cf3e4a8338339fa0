//! Text printed before the tree: bucket metrics and the cost warning

use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::metrics::{BucketMetrics, Metric};

pub const CONFIRM_QUESTION: &str = "Please confirm if you want to proceed";
pub const ABORT_MESSAGE: &str = "Abort action.";

fn metric_value(metric: &Metric) -> String {
    match &metric.unit {
        Some(unit) => format!("{} {}", metric.whole(), unit),
        None => metric.whole().to_string(),
    }
}

/// Write the "Bucket Metrics" block.
pub fn write_metrics<W: WriteColor>(
    out: &mut W,
    container: &str,
    metrics: &BucketMetrics,
) -> io::Result<()> {
    writeln!(out)?;
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "Bucket Metrics:")?;
    out.reset()?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "{}: {}", container, metric_value(&metrics.size))?;
    writeln!(out, "{}: {} Object/s", container, metrics.object_count.whole())
}

/// Write the warning shown before listing a whole bucket.
pub fn write_cost_warning<W: WriteColor>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    write!(out, "WARNING!!!")?;
    out.reset()?;
    writeln!(out, " - Running this script on buckets with many")?;
    writeln!(
        out,
        "objects could be expensive and might take a while till finish."
    )?;
    writeln!(out)
}
