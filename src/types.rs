use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Ground-truth label for samples taken while the signal is at rest
pub const REST_LABEL: &str = "REST";

/// Ground-truth label for samples taken during a gesture
pub const ACTIVATION_LABEL: &str = "ACTIVATION";

/// One decoded sensor reading
///
/// Field names on the wire are `timeStamp`, `data` and `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "timeStamp")]
    pub timestamp: i64,
    #[serde(rename = "data")]
    pub amplitude: i32,
    pub label: String,
}

impl Sample {
    pub fn new(timestamp: i64, amplitude: i32, label: impl Into<String>) -> Self {
        Self {
            timestamp,
            amplitude,
            label: label.into(),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sample(timeStamp={}, data={}, label={})",
            self.timestamp, self.amplitude, self.label
        )
    }
}

/// A single detected gesture. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Activation;

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub id: String,
    pub classifier: String,
    pub reorder_window: i64,
    pub samples_received: u64,
    pub late_samples_dropped: u64,
    pub late_samples_kept: u64,
    pub activations: u64,
    pub started_at: String,
    pub finished_at: Option<String>,
}

impl RunReport {
    pub fn new(classifier: impl Into<String>, reorder_window: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            classifier: classifier.into(),
            reorder_window,
            samples_received: 0,
            late_samples_dropped: 0,
            late_samples_kept: 0,
            activations: 0,
            started_at: chrono::Utc::now().to_rfc3339(),
            finished_at: None,
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_wire_names() {
        let sample: Sample =
            serde_json::from_str(r#"{"timeStamp": 17, "data": -42, "label": "REST"}"#).unwrap();
        assert_eq!(sample, Sample::new(17, -42, REST_LABEL));
    }

    #[test]
    fn test_report_finish_sets_timestamp() {
        let report = RunReport::new("alpha", 40);
        assert!(report.finished_at.is_none());
        let report = report.finish();
        assert!(report.finished_at.is_some());
        assert_eq!(report.classifier, "alpha");
    }
}
