//! Oscillation classifier
//!
//! Small amplitudes are zeroed, then each sliding window counts sign flips and
//! large jumps between adjacent samples. A window matches when both counts
//! reach their thresholds.

use super::window::RollingExt;
use super::{
    invalid_options, opposite_signs, parse_options, ActivationStream, Classifier, SampleStream,
};
use crate::edge::EdgeExt;
use crate::error::Result;
use crate::types::Activation;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GammaOptions {
    pub noise_floor: i64,
    pub window_size: usize,
    pub cross_count_threshold: usize,
    pub jerk_size_threshold: i64,
    pub jerk_count_threshold: usize,
}

impl Default for GammaOptions {
    fn default() -> Self {
        Self {
            noise_floor: 10000,
            window_size: 5,
            cross_count_threshold: 2,
            jerk_size_threshold: 20000,
            jerk_count_threshold: 2,
        }
    }
}

impl GammaOptions {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.noise_floor < 0 {
            return Err(format!(
                "noiseFloor must be non-negative, got {}",
                self.noise_floor
            ));
        }
        if self.window_size == 0 {
            return Err("windowSize must be greater than 0".to_string());
        }
        if self.jerk_size_threshold < 0 {
            return Err(format!(
                "jerkSizeThreshold must be non-negative, got {}",
                self.jerk_size_threshold
            ));
        }
        Ok(())
    }
}

/// Counts over the adjacent pairs of one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowActivity {
    pub crossings: usize,
    pub jerks: usize,
}

impl WindowActivity {
    pub fn measure(window: &VecDeque<i32>, jerk_size_threshold: i64) -> Self {
        window
            .iter()
            .zip(window.iter().skip(1))
            .fold(Self::default(), |mut acc, (&a, &b)| {
                if opposite_signs(a, b) {
                    acc.crossings += 1;
                }
                if (i64::from(b) - i64::from(a)).abs() > jerk_size_threshold {
                    acc.jerks += 1;
                }
                acc
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gamma {
    options: GammaOptions,
}

impl Gamma {
    pub const NAME: &'static str = "gamma";

    pub fn new(options: GammaOptions) -> Result<Self> {
        options
            .validate()
            .map_err(|msg| invalid_options(Self::NAME, msg))?;
        Ok(Self { options })
    }

    pub fn from_options(raw: Option<&str>) -> Result<Self> {
        let options: GammaOptions = parse_options(Self::NAME, raw)?;
        log::debug!("{} options: {:?}", Self::NAME, options);
        Self::new(options)
    }

    pub fn options(&self) -> &GammaOptions {
        &self.options
    }
}

impl Classifier for Gamma {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify<'a>(&self, samples: SampleStream<'a>) -> ActivationStream<'a> {
        let GammaOptions {
            noise_floor,
            window_size,
            cross_count_threshold,
            jerk_size_threshold,
            jerk_count_threshold,
        } = self.options;

        let matches = samples
            .map(move |s| {
                if i64::from(s.amplitude).abs() < noise_floor {
                    0
                } else {
                    s.amplitude
                }
            })
            .rolling(window_size, 1, move |w| {
                let activity = WindowActivity::measure(w, jerk_size_threshold);
                activity.crossings >= cross_count_threshold
                    && activity.jerks >= jerk_count_threshold
            });

        Box::new(matches.trailing_edges().filter(|&m| m).map(|_| Activation))
    }
}
