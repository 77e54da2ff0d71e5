use super::{Alpha, Beta, CheatLeading, CheatTrailing, Classifier, Gamma, GammaOptions};
use super::WindowedThresholdOptions;
use crate::error::{ActivationError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Builds a classifier from its raw JSON option object
pub type ClassifierFactory = fn(Option<&str>) -> Result<Box<dyn Classifier>>;

/// Registry entry describing one classifier
#[derive(Clone)]
pub struct ClassifierEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub factory: ClassifierFactory,
    pub defaults: fn() -> Option<serde_json::Value>,
}

impl ClassifierEntry {
    /// Default option object, or `None` for classifiers without options
    pub fn default_options(&self) -> Option<serde_json::Value> {
        (self.defaults)()
    }
}

impl std::fmt::Debug for ClassifierEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierEntry")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish()
    }
}

fn no_defaults() -> Option<serde_json::Value> {
    None
}

fn threshold_defaults() -> Option<serde_json::Value> {
    serde_json::to_value(WindowedThresholdOptions::default()).ok()
}

fn gamma_defaults() -> Option<serde_json::Value> {
    serde_json::to_value(GammaOptions::default()).ok()
}

// =============================================================================
// BUILT-IN CLASSIFIERS
// =============================================================================

pub const CHEAT_LEADING: ClassifierEntry = ClassifierEntry {
    name: CheatLeading::NAME,
    summary: "Ground-truth label enters ACTIVATION",
    factory: |raw| Ok(Box::new(CheatLeading::from_options(raw)?)),
    defaults: no_defaults,
};

pub const CHEAT_TRAILING: ClassifierEntry = ClassifierEntry {
    name: CheatTrailing::NAME,
    summary: "Ground-truth label leaves ACTIVATION",
    factory: |raw| Ok(Box::new(CheatTrailing::from_options(raw)?)),
    defaults: no_defaults,
};

pub const ALPHA: ClassifierEntry = ClassifierEntry {
    name: Alpha::NAME,
    summary: "Mean absolute amplitude over a rolling window exceeds threshold; fires when the run ends",
    factory: |raw| Ok(Box::new(Alpha::from_options(raw)?)),
    defaults: threshold_defaults,
};

pub const BETA: ClassifierEntry = ClassifierEntry {
    name: Beta::NAME,
    summary: "Every absolute amplitude in a rolling window exceeds threshold; fires when the run ends",
    factory: |raw| Ok(Box::new(Beta::from_options(raw)?)),
    defaults: threshold_defaults,
};

pub const GAMMA: ClassifierEntry = ClassifierEntry {
    name: Gamma::NAME,
    summary: "Enough zero-crossings and jerks within a sliding window; fires when the run ends",
    factory: |raw| Ok(Box::new(Gamma::from_options(raw)?)),
    defaults: gamma_defaults,
};

/// Name, summary and default options of one classifier, as listed to users
#[derive(Debug, Clone, Serialize)]
pub struct ClassifierDescription {
    pub name: &'static str,
    pub summary: &'static str,
    pub default_options: Option<serde_json::Value>,
}

/// Immutable name → factory lookup, built once at startup
#[derive(Debug, Clone, Default)]
pub struct ClassifierRegistry {
    entries: BTreeMap<&'static str, ClassifierEntry>,
}

impl ClassifierRegistry {
    /// Registry holding every built-in classifier
    pub fn builtin() -> Self {
        Self::default()
            .with(CHEAT_LEADING)
            .with(CHEAT_TRAILING)
            .with(ALPHA)
            .with(BETA)
            .with(GAMMA)
    }

    pub fn with(mut self, entry: ClassifierEntry) -> Self {
        self.entries.insert(entry.name, entry);
        self
    }

    /// Classifier names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ClassifierEntry> {
        self.entries.values()
    }

    pub fn get(&self, name: &str) -> Option<&ClassifierEntry> {
        self.entries.get(name)
    }

    /// Describe every registered classifier, sorted by name.
    pub fn describe(&self) -> Vec<ClassifierDescription> {
        self.entries()
            .map(|entry| ClassifierDescription {
                name: entry.name,
                summary: entry.summary,
                default_options: entry.default_options(),
            })
            .collect()
    }

    /// Construct a fresh classifier by name with the given JSON options.
    pub fn build(&self, name: &str, options: Option<&str>) -> Result<Box<dyn Classifier>> {
        let entry = self.get(name).ok_or_else(|| {
            ActivationError::UnknownClassifier(format!(
                "{} (available: {})",
                name,
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })?;

        (entry.factory)(options)
    }
}
