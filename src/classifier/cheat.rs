//! Classifiers that read the ground-truth label instead of the signal.
//! Useful as a reference when tuning the signal-based classifiers.

use super::{parse_options, ActivationStream, Classifier, SampleStream};
use crate::edge::EdgeExt;
use crate::error::Result;
use crate::types::{Activation, ACTIVATION_LABEL};
use serde::Deserialize;

/// Option object accepted by classifiers that take no parameters
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoOptions {}

/// Fires when the label stream enters the activation label.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheatLeading;

impl CheatLeading {
    pub const NAME: &'static str = "cheat-leading";

    pub fn from_options(raw: Option<&str>) -> Result<Self> {
        parse_options::<NoOptions>(Self::NAME, raw)?;
        Ok(Self)
    }
}

impl Classifier for CheatLeading {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify<'a>(&self, samples: SampleStream<'a>) -> ActivationStream<'a> {
        Box::new(
            samples
                .map(|s| s.label)
                .leading_edges()
                .filter(|label| label == ACTIVATION_LABEL)
                .map(|_| Activation),
        )
    }
}

/// Fires when the label stream leaves the activation label.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheatTrailing;

impl CheatTrailing {
    pub const NAME: &'static str = "cheat-trailing";

    pub fn from_options(raw: Option<&str>) -> Result<Self> {
        parse_options::<NoOptions>(Self::NAME, raw)?;
        Ok(Self)
    }
}

impl Classifier for CheatTrailing {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify<'a>(&self, samples: SampleStream<'a>) -> ActivationStream<'a> {
        Box::new(
            samples
                .map(|s| s.label)
                .trailing_edges()
                .filter(|label| label == ACTIVATION_LABEL)
                .map(|_| Activation),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Sample, REST_LABEL};

    fn labelled(labels: &[&str]) -> SampleStream<'static> {
        let samples: Vec<Sample> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Sample::new(i as i64, 0, *label))
            .collect();
        Box::new(samples.into_iter())
    }

    const A: &str = ACTIVATION_LABEL;
    const R: &str = REST_LABEL;

    #[test]
    fn test_leading_counts_entries() {
        let stream = labelled(&[R, R, A, A, A, R, A, R]);
        assert_eq!(CheatLeading.classify(stream).count(), 2);
    }

    #[test]
    fn test_leading_ignores_initial_activation_run() {
        let stream = labelled(&[A, A, R, R]);
        assert_eq!(CheatLeading.classify(stream).count(), 0);
    }

    #[test]
    fn test_trailing_counts_exits() {
        let stream = labelled(&[R, A, A, R, R, A, R]);
        assert_eq!(CheatTrailing.classify(stream).count(), 2);
    }

    #[test]
    fn test_trailing_needs_run_to_end() {
        let stream = labelled(&[R, R, A, A]);
        assert_eq!(CheatTrailing.classify(stream).count(), 0);

        let stream = labelled(&[A, A, R]);
        assert_eq!(CheatTrailing.classify(stream).count(), 1);
    }

    #[test]
    fn test_options_must_be_empty() {
        assert!(CheatLeading::from_options(None).is_ok());
        assert!(CheatLeading::from_options(Some("{}")).is_ok());
        assert!(CheatTrailing::from_options(Some(r#"{"threshold": 1}"#)).is_err());
    }
}
