//! Edge-triggered activation classifiers
//!
//! Every classifier reduces the reordered sample stream to a sparse stream of
//! [`Activation`]s. Each contiguous run of its match condition yields at most
//! one activation.

mod amplitude;
mod cheat;
mod gamma;
mod registry;
mod window;

use crate::error::{ActivationError, Result};
use crate::types::{Activation, Sample};
use serde::de::DeserializeOwned;
use std::fmt;

pub use amplitude::{Alpha, Beta, WindowedThresholdOptions};
pub use cheat::{CheatLeading, CheatTrailing};
pub use gamma::{Gamma, GammaOptions};
pub use registry::{
    ClassifierDescription, ClassifierEntry, ClassifierFactory, ClassifierRegistry,
};
pub use window::{RollingExt, RollingWindow, Rolling};

pub type SampleStream<'a> = Box<dyn Iterator<Item = Sample> + 'a>;
pub type ActivationStream<'a> = Box<dyn Iterator<Item = Activation> + 'a>;

/// Transforms samples into activations.
///
/// `classify` must build all of its run state inside the call so that two
/// invocations never share state.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify<'a>(&self, samples: SampleStream<'a>) -> ActivationStream<'a>;
}

impl fmt::Debug for dyn Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Classifier").field(&self.name()).finish()
    }
}

/// True iff `a` and `b` are both non-zero and of opposite sign.
pub fn opposite_signs(a: i32, b: i32) -> bool {
    a.signum() * b.signum() < 0
}

/// Decode a classifier's JSON option object, falling back to defaults when no
/// options were supplied.
pub(crate) fn parse_options<T>(classifier: &str, raw: Option<&str>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(json) => {
            let value: serde_json::Value =
                serde_json::from_str(json).map_err(|e| invalid_options(classifier, e.to_string()))?;
            // derived struct deserializers would also take a positional array
            if !value.is_object() {
                return Err(invalid_options(
                    classifier,
                    format!("options must be a JSON object, got {}", value),
                ));
            }
            serde_json::from_value(value).map_err(|e| invalid_options(classifier, e.to_string()))
        }
    }
}

pub(crate) fn invalid_options(classifier: &str, message: impl Into<String>) -> ActivationError {
    ActivationError::InvalidOptions {
        classifier: classifier.to_string(),
        message: message.into(),
    }
}
