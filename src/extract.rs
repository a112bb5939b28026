/// Metric extraction from PSPNet evaluation logs.
///
/// Scans the raw log text for per-class IoU lines (e.g. ` 12 wall: 0.8012`),
/// the `Mean IoU over N classes: X` summary and the
/// `Pixel-wise Accuracy: XX.XX%` summary.
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// One per-class line: up to two leading spaces, a 1-3 digit index,
/// whitespace, a letters-and-spaces class name, `: ` and a `[01].dddd` IoU.
static IOU_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]{0,2}(\d{1,3})[ \t]+([A-Za-z][A-Za-z ]*): ([01]\.\d{4})").unwrap()
});

static MEAN_IOU_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Mean IoU over \d+ classes: ([01]\.\d{4})").unwrap());

static PIXEL_ACCURACY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Pixel-wise Accuracy: (\d{2}\.\d{2})%").unwrap());

/// A single per-class IoU entry, in the order it appeared in the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IouRecord {
    /// Ordinal as printed in the log. Not used for ordering.
    pub class_index: u16,
    pub class_name: String,
    pub iou: f64,
}

/// Everything extracted from one log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogReport {
    pub records: Vec<IouRecord>,
    pub mean_iou: f64,
    pub pixel_wise_accuracy: f64,
}

/// The mandatory summary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMetric {
    MeanIou,
    PixelWiseAccuracy,
}

impl SummaryMetric {
    /// The line shape searched for, for error messages.
    pub fn pattern(self) -> &'static str {
        match self {
            SummaryMetric::MeanIou => "Mean IoU over <N> classes: <d.dddd>",
            SummaryMetric::PixelWiseAccuracy => "Pixel-wise Accuracy: <dd.dd>%",
        }
    }
}

impl std::fmt::Display for SummaryMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryMetric::MeanIou => write!(f, "mean IoU"),
            SummaryMetric::PixelWiseAccuracy => write!(f, "pixel-wise accuracy"),
        }
    }
}

#[derive(Debug)]
pub enum ExtractError {
    /// A mandatory summary line is absent from the log.
    PatternNotFound { metric: SummaryMetric },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::PatternNotFound { metric } => {
                write!(
                    f,
                    "{metric} not found in log (expected a line like \"{}\")",
                    metric.pattern()
                )
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Find every per-class IoU line in document order.
///
/// Lines that don't match are skipped silently; duplicates are kept.
pub fn extract_iou_records(text: &str) -> Vec<IouRecord> {
    let mut records = Vec::new();
    for caps in IOU_LINE.captures_iter(text) {
        // The pattern bounds both groups, so these parses can't fail.
        let (Ok(class_index), Ok(iou)) = (caps[1].parse::<u16>(), caps[3].parse::<f64>()) else {
            continue;
        };
        let record = IouRecord {
            class_index,
            class_name: caps[2].to_string(),
            iou,
        };
        tracing::debug!(
            class_index = record.class_index,
            class_name = %record.class_name,
            iou = record.iou,
            "matched class line"
        );
        records.push(record);
    }
    records
}

/// Value of the first `Mean IoU over N classes: X` line.
pub fn extract_mean_iou(text: &str) -> Result<f64, ExtractError> {
    first_value(&MEAN_IOU_LINE, text, SummaryMetric::MeanIou)
}

/// Percentage from the first `Pixel-wise Accuracy: XX.XX%` line, without the `%`.
pub fn extract_pixel_wise_accuracy(text: &str) -> Result<f64, ExtractError> {
    first_value(&PIXEL_ACCURACY_LINE, text, SummaryMetric::PixelWiseAccuracy)
}

/// Run all three extractions over one log.
pub fn extract_report(text: &str) -> Result<LogReport, ExtractError> {
    let records = extract_iou_records(text);
    let mean_iou = extract_mean_iou(text)?;
    let pixel_wise_accuracy = extract_pixel_wise_accuracy(text)?;
    Ok(LogReport {
        records,
        mean_iou,
        pixel_wise_accuracy,
    })
}

fn first_value(pattern: &Regex, text: &str, metric: SummaryMetric) -> Result<f64, ExtractError> {
    let value = pattern
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .ok_or(ExtractError::PatternNotFound { metric })?;
    tracing::debug!(%metric, value, "matched summary line");
    Ok(value)
}
