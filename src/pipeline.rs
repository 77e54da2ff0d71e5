//! Pipeline assembly: source → reorderer → tap → classifier → sink
//!
//! Evaluation is pull-driven by the activation loop; the only blocking point
//! is the source's read.

use crate::classifier::Classifier;
use crate::error::{ActivationError, Result};
use crate::reorder::reorder;
use crate::sink::ActivationSink;
use crate::types::{RunReport, Sample};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Options that shape a pipeline run, independent of the chosen classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Reorder window in samples; 0 disables reordering
    pub reorder_window: i64,
    /// Admit samples older than the whole window instead of dropping them
    pub keep_late_samples: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reorder_window: 40,
            keep_late_samples: false,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.reorder_window < 0 {
            return Err(ActivationError::InvalidParameter(format!(
                "reorder window size must be non-negative, got {}",
                self.reorder_window
            )));
        }
        Ok(())
    }
}

/// Observes pipeline events. All methods default to doing nothing.
pub trait Reporter {
    /// A sample leaving the reorderer, before classification
    fn sample(&self, _sample: &Sample) {}

    /// A sample that arrived after the whole window had moved past it
    fn late_sample(&self, _sample: &Sample, _kept: bool) {}

    fn activation(&self) {}
}

/// Reporter that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct Quiet;

impl Reporter for Quiet {}

/// Drive one run to completion.
///
/// Returns when the source is exhausted, or with the first source or sink
/// error. No acknowledgement is sent once the source has failed.
pub fn run_pipeline<S, R, K>(
    source: S,
    classifier: &dyn Classifier,
    config: &PipelineConfig,
    reporter: &R,
    sink: &mut K,
) -> Result<RunReport>
where
    S: Iterator<Item = Result<Sample>>,
    R: Reporter + ?Sized,
    K: ActivationSink + ?Sized,
{
    config.validate()?;

    let mut report = RunReport::new(classifier.name(), config.reorder_window);
    let failure: Cell<Option<ActivationError>> = Cell::new(None);
    let keep_late = config.keep_late_samples;

    let mut received = 0u64;
    let mut late_kept = 0u64;
    let mut late_dropped = 0u64;

    log::info!(
        "Starting run {} (classifier: {}, reorder window: {})",
        report.id,
        report.classifier,
        config.reorder_window
    );

    {
        let decoded = source.map_while(|item| match item {
            Ok(sample) => {
                received += 1;
                Some(sample)
            }
            Err(e) => {
                failure.set(Some(e));
                None
            }
        })
        .fuse();

        let ordered = reorder(
            config.reorder_window,
            |s: &Sample| s.timestamp,
            decoded,
            |s: &Sample| {
                if keep_late {
                    late_kept += 1;
                    log::debug!("Keeping late sample: {:?}", s);
                } else {
                    late_dropped += 1;
                    log::debug!("Discarding late sample: {:?}", s);
                }
                reporter.late_sample(s, keep_late);
                keep_late
            },
        )?;

        let tapped = ordered.inspect(|s| {
            log::trace!("{:?}", s);
            reporter.sample(s);
        });

        for activation in classifier.classify(Box::new(tapped)) {
            if let Some(e) = failure.take() {
                return Err(e);
            }
            report.activations += 1;
            reporter.activation();
            sink.acknowledge(activation)?;
        }
    }

    if let Some(e) = failure.take() {
        log::error!("Run {} failed: {}", report.id, e);
        return Err(e);
    }

    report.samples_received = received;
    report.late_samples_kept = late_kept;
    report.late_samples_dropped = late_dropped;

    log::info!(
        "Run {} finished: {} samples, {} activations, {} late dropped, {} late kept",
        report.id,
        report.samples_received,
        report.activations,
        report.late_samples_dropped,
        report.late_samples_kept
    );

    Ok(report.finish())
}
