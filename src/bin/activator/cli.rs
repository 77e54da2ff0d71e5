use activation_rs::transport::DEFAULT_PORT_FILE;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "activator",
    version,
    about = "Activation detection over a live sensor sample stream",
    long_about = "Reads timestamped samples (newline-delimited JSON), restores their time order\n\
                  within a bounded window, classifies activations and acknowledges each one."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Connect to the sample server and acknowledge activations
    Run(RunArgs),
    /// Classify samples from a newline-delimited JSON file, acknowledging on stdout
    Replay(ReplayArgs),
    /// List classifiers and their default options
    Classifiers(ClassifiersArgs),
}

/// Options shared by every command that runs the pipeline
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Size of window used to reorder out-of-order samples (0 disables reordering)
    #[arg(long, default_value_t = 40, allow_negative_numbers = true)]
    pub reorder_window: i64,

    /// Classifier algorithm to use (see `activator classifiers`)
    #[arg(short, long, default_value = "gamma")]
    pub classifier: String,

    /// JSON-encoded parameters for the selected classifier
    #[arg(long)]
    pub classifier_options: Option<String>,

    /// Consider out-of-order samples that arrive outside the reordering window
    #[arg(long, default_value_t = false)]
    pub keep_late_samples: bool,

    /// Print all received samples (very noisy)
    #[arg(long, default_value_t = false)]
    pub print_samples: bool,

    /// Print out-of-order samples that arrive outside the reordering window
    #[arg(long, default_value_t = false)]
    pub print_late_samples: bool,

    /// Don't print a message when sending activations
    #[arg(long, default_value_t = false)]
    pub hide_activations: bool,

    /// Write a JSON run report to this path when the run ends
    #[arg(long)]
    pub report: Option<String>,
}

#[derive(Args)]
pub struct RunArgs {
    /// Sample server host
    #[arg(short = 'H', long, default_value = "localhost", env = "ACTIVATOR_HOST")]
    pub host: String,

    /// Sample server port (read from --port-file when omitted)
    #[arg(short, long, env = "ACTIVATOR_PORT")]
    pub port: Option<u16>,

    /// File holding the server port
    #[arg(long, default_value = DEFAULT_PORT_FILE)]
    pub port_file: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Newline-delimited JSON sample file
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args)]
pub struct ClassifiersArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
