use crate::cli::ClassifiersArgs;
use crate::exit_codes;
use crate::output;
use activation_rs::ClassifierRegistry;

pub fn execute(args: ClassifiersArgs) -> i32 {
    let classifiers = ClassifierRegistry::builtin().describe();

    if args.json {
        let written = output::to_json(&classifiers).and_then(|json| output::write_output(&json, None));
        if let Err(e) = written {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
        return exit_codes::SUCCESS;
    }

    println!("Available classifiers:\n");
    for c in &classifiers {
        println!("  {:<16} {}", c.name, c.summary);
        match &c.default_options {
            Some(options) => println!("  {:<16} options: {}", "", options),
            None => println!("  {:<16} options: none", ""),
        }
    }
    println!();
    println!("Pass options as JSON, e.g. --classifier alpha --classifier-options '{{\"threshold\": 8000}}'");

    exit_codes::SUCCESS
}
