use crate::cli::ReplayArgs;
use crate::console::ConsoleReporter;
use crate::exit_codes;
use crate::output;
use crate::params;
use activation_rs::codec::LineSource;
use activation_rs::{run_pipeline, AckWriter, ClassifierRegistry};
use std::fs::File;
use std::io::BufReader;

pub fn execute(args: ReplayArgs) -> i32 {
    let registry = ClassifierRegistry::builtin();

    let (classifier, config) = match params::build_pipeline(&args.pipeline, &registry) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("fatal: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let file = match File::open(&args.file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("fatal: cannot open sample file '{}': {}", args.file, e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let source = LineSource::new(BufReader::new(file));
    let reporter = ConsoleReporter::from_args(&args.pipeline);
    let mut sink = AckWriter::new(std::io::stdout());

    match run_pipeline(source, classifier.as_ref(), &config, &reporter, &mut sink) {
        Ok(report) => {
            if let Err(e) = output::write_report(&report, args.pipeline.report.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("fatal: {}", e);
            exit_codes::for_error(&e)
        }
    }
}
