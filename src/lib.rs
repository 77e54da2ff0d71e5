pub mod types;
pub mod error;
pub mod reorder;
pub mod edge;
pub mod classifier;
pub mod codec;
pub mod sink;
pub mod transport;
pub mod pipeline;

pub use types::*;
pub use error::{ActivationError, Result};
pub use reorder::{reorder, Reorder, ReorderExt};
pub use edge::{EdgeDetector, EdgeExt};
pub use classifier::{opposite_signs, Classifier, ClassifierRegistry};
pub use sink::{ActivationSink, AckWriter, ACK_LINE};
pub use pipeline::{run_pipeline, PipelineConfig, Reporter};
