use crate::cli::RunArgs;
use crate::console::ConsoleReporter;
use crate::exit_codes;
use crate::output;
use crate::params;
use activation_rs::transport;
use activation_rs::ClassifierRegistry;

pub async fn execute(args: RunArgs) -> i32 {
    let registry = ClassifierRegistry::builtin();

    // Configuration errors surface before the connection is opened
    let (classifier, config) = match params::build_pipeline(&args.pipeline, &registry) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("fatal: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let port = match params::resolve_port(args.port, &args.port_file) {
        Ok(port) => port,
        Err(e) => {
            eprintln!("fatal: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let connection = match transport::connect(&args.host, port).await {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("fatal: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    let reporter = ConsoleReporter::from_args(&args.pipeline);
    match connection.run(classifier, config, reporter).await {
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
