use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

mod commands;

/// rpmtree CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Resolve the packages to install for a set of package names
    Resolve(commands::resolve::Opt),
}

/// Entry point of the `rpmtree` cli.
fn main() -> anyhow::Result<()> {
    // Parse the command line arguments
    let cli = Cli::parse();

    // Setup default logging level
    let default_filter = cli.verbose.tracing_level_filter();

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_filter.into())
        .from_env()?;

    // Setup the tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .finish()
        .try_init()?;

    // Dispatch the selected command
    match cli.command {
        Commands::Resolve(opt) => commands::resolve::resolve(opt),
    }
}
