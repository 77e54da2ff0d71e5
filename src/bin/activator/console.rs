use crate::cli::PipelineArgs;
use activation_rs::{Reporter, Sample};

/// Prints pipeline events on stdout according to the --print-* flags
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    print_samples: bool,
    print_late_samples: bool,
    print_activations: bool,
}

impl ConsoleReporter {
    pub fn from_args(args: &PipelineArgs) -> Self {
        Self {
            print_samples: args.print_samples,
            print_late_samples: args.print_late_samples,
            print_activations: !args.hide_activations,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn sample(&self, sample: &Sample) {
        if self.print_samples {
            println!("{}", sample);
        }
    }

    fn late_sample(&self, sample: &Sample, kept: bool) {
        if self.print_late_samples {
            let verdict = if kept { "kept" } else { "discarded" };
            println!("{} late sample: {}", verdict, sample);
        }
    }

    fn activation(&self) {
        if self.print_activations {
            println!("ACTIVATION");
        }
    }
}
