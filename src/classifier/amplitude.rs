//! Amplitude threshold classifiers
//!
//! Both fire once when a sustained run of high-amplitude windows ends.
//! `alpha` compares the mean absolute amplitude against the threshold, `beta`
//! requires every sample in the window to exceed it.

use super::window::RollingExt;
use super::{invalid_options, parse_options, ActivationStream, Classifier, SampleStream};
use crate::edge::EdgeExt;
use crate::error::Result;
use crate::types::Activation;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Parameters shared by `alpha` and `beta`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct WindowedThresholdOptions {
    pub threshold: f64,
    pub window_size: usize,
    pub step: usize,
}

impl Default for WindowedThresholdOptions {
    fn default() -> Self {
        Self {
            threshold: 10000.0,
            window_size: 5,
            step: 1,
        }
    }
}

impl WindowedThresholdOptions {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            ));
        }
        if self.window_size == 0 {
            return Err("windowSize must be greater than 0".to_string());
        }
        if self.step == 0 {
            return Err("step must be greater than 0".to_string());
        }
        Ok(())
    }

    fn parse(classifier: &str, raw: Option<&str>) -> Result<Self> {
        let opts: Self = parse_options(classifier, raw)?;
        opts.validate().map_err(|msg| invalid_options(classifier, msg))?;
        Ok(opts)
    }
}

fn magnitude(amplitude: i32) -> i64 {
    i64::from(amplitude).abs()
}

fn mean_magnitude(window: &VecDeque<i32>) -> f64 {
    let total: i64 = window.iter().map(|&a| magnitude(a)).sum();
    total as f64 / window.len() as f64
}

/// Fire on the trailing edge of each run of `true` window matches.
fn activations_on_run_end<'a, I>(matches: I) -> ActivationStream<'a>
where
    I: Iterator<Item = bool> + 'a,
{
    Box::new(matches.trailing_edges().filter(|&m| m).map(|_| Activation))
}

/// Mean absolute amplitude over the window exceeds the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alpha {
    options: WindowedThresholdOptions,
}

impl Alpha {
    pub const NAME: &'static str = "alpha";

    pub fn new(options: WindowedThresholdOptions) -> Result<Self> {
        options
            .validate()
            .map_err(|msg| invalid_options(Self::NAME, msg))?;
        Ok(Self { options })
    }

    pub fn from_options(raw: Option<&str>) -> Result<Self> {
        let options = WindowedThresholdOptions::parse(Self::NAME, raw)?;
        log::debug!("{} options: {:?}", Self::NAME, options);
        Ok(Self { options })
    }

    pub fn options(&self) -> &WindowedThresholdOptions {
        &self.options
    }
}

impl Classifier for Alpha {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify<'a>(&self, samples: SampleStream<'a>) -> ActivationStream<'a> {
        let WindowedThresholdOptions {
            threshold,
            window_size,
            step,
        } = self.options;

        activations_on_run_end(
            samples
                .map(|s| s.amplitude)
                .rolling(window_size, step, move |w| mean_magnitude(w) > threshold),
        )
    }
}

/// Every sample in the window exceeds the threshold in absolute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beta {
    options: WindowedThresholdOptions,
}

impl Beta {
    pub const NAME: &'static str = "beta";

    pub fn new(options: WindowedThresholdOptions) -> Result<Self> {
        options
            .validate()
            .map_err(|msg| invalid_options(Self::NAME, msg))?;
        Ok(Self { options })
    }

    pub fn from_options(raw: Option<&str>) -> Result<Self> {
        let options = WindowedThresholdOptions::parse(Self::NAME, raw)?;
        log::debug!("{} options: {:?}", Self::NAME, options);
        Ok(Self { options })
    }

    pub fn options(&self) -> &WindowedThresholdOptions {
        &self.options
    }
}

impl Classifier for Beta {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify<'a>(&self, samples: SampleStream<'a>) -> ActivationStream<'a> {
        let WindowedThresholdOptions {
            threshold,
            window_size,
            step,
        } = self.options;

        activations_on_run_end(samples.map(|s| s.amplitude).rolling(
            window_size,
            step,
            move |w| w.iter().all(|&a| magnitude(a) as f64 > threshold),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    fn stream(amplitudes: &[i32]) -> SampleStream<'static> {
        let samples: Vec<Sample> = amplitudes
            .iter()
            .enumerate()
            .map(|(i, &a)| Sample::new(i as i64, a, "REST"))
            .collect();
        Box::new(samples.into_iter())
    }

    fn opts(threshold: f64, window_size: usize, step: usize) -> WindowedThresholdOptions {
        WindowedThresholdOptions {
            threshold,
            window_size,
            step,
        }
    }

    #[test]
    fn test_alpha_fires_once_when_high_run_ends() {
        let alpha = Alpha::new(opts(10.0, 3, 1)).unwrap();
        let fired = alpha.classify(stream(&[20, 20, 20, 1, 1, 1])).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_alpha_waits_for_run_to_end() {
        let alpha = Alpha::new(opts(10.0, 3, 1)).unwrap();
        let mut activations = alpha.classify(stream(&[20, 20, 20, 20]));
        assert_eq!(activations.next(), None);
    }

    #[test]
    fn test_alpha_uses_absolute_values() {
        let alpha = Alpha::new(opts(10.0, 2, 1)).unwrap();
        assert_eq!(alpha.classify(stream(&[-30, -30, 0, 0])).count(), 1);
    }

    #[test]
    fn test_alpha_handles_extreme_amplitudes() {
        let alpha = Alpha::new(opts(10.0, 2, 1)).unwrap();
        assert_eq!(alpha.classify(stream(&[i32::MIN, i32::MIN, 0, 0])).count(), 1);
    }

    #[test]
    fn test_alpha_two_runs_two_activations() {
        let alpha = Alpha::new(opts(10.0, 2, 2)).unwrap();
        let amplitudes = [50, 50, 0, 0, 50, 50, 50, 50, 0, 0];
        assert_eq!(alpha.classify(stream(&amplitudes)).count(), 2);
    }

    #[test]
    fn test_beta_requires_every_sample() {
        // mean is above threshold but one sample is not
        let amplitudes = [100, 100, 1, 100, 100, 1, 0, 0, 0];
        let alpha = Alpha::new(opts(10.0, 3, 1)).unwrap();
        let beta = Beta::new(opts(10.0, 3, 1)).unwrap();
        assert_eq!(alpha.classify(stream(&amplitudes)).count(), 1);
        assert_eq!(beta.classify(stream(&amplitudes)).count(), 0);

        let amplitudes = [100, -100, 100, 0, 0, 0];
        assert_eq!(beta.classify(stream(&amplitudes)).count(), 1);
    }

    #[test]
    fn test_classify_state_is_per_call() {
        let alpha = Alpha::new(opts(10.0, 2, 1)).unwrap();
        // first run ends on a high run; a second call must not see it
        assert_eq!(alpha.classify(stream(&[50, 50, 50])).count(), 0);
        assert_eq!(alpha.classify(stream(&[0, 0, 0])).count(), 0);
    }

    #[test]
    fn test_options_parse_and_validate() {
        let alpha = Alpha::from_options(Some(r#"{"threshold": 12.5, "windowSize": 3}"#)).unwrap();
        assert_eq!(alpha.options(), &opts(12.5, 3, 1));

        assert_eq!(
            Beta::from_options(None).unwrap().options(),
            &WindowedThresholdOptions::default()
        );

        assert!(Alpha::from_options(Some(r#"{"windowSize": 0}"#)).is_err());
        assert!(Alpha::from_options(Some(r#"{"step": 0}"#)).is_err());
        assert!(Beta::from_options(Some(r#"{"threshold": -1}"#)).is_err());
        assert!(Beta::from_options(Some(r#"{"windowSize": -3}"#)).is_err());
        assert!(Beta::from_options(Some(r#"{"window": 3}"#)).is_err());
    }
}
