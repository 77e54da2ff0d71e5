use crate::cli::PipelineArgs;
use activation_rs::transport::read_port_file;
use activation_rs::{Classifier, ClassifierRegistry, PipelineConfig, Result};

/// Resolve the classifier and pipeline options before any I/O happens.
pub fn build_pipeline(
    args: &PipelineArgs,
    registry: &ClassifierRegistry,
) -> Result<(Box<dyn Classifier>, PipelineConfig)> {
    let config = PipelineConfig {
        reorder_window: args.reorder_window,
        keep_late_samples: args.keep_late_samples,
    };
    config.validate()?;

    let classifier = registry.build(&args.classifier, args.classifier_options.as_deref())?;
    log::info!(
        "Using classifier '{}' with reorder window {}",
        classifier.name(),
        config.reorder_window
    );

    Ok((classifier, config))
}

pub fn resolve_port(port: Option<u16>, port_file: &str) -> Result<u16> {
    match port {
        Some(port) => Ok(port),
        None => {
            let port = read_port_file(port_file)?;
            log::info!("Discovered port {} in {}", port, port_file);
            Ok(port)
        }
    }
}
