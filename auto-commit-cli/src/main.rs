use auto_commit_core::{execute_auto_commit_flow, style, CoreCliArgs, Parser};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli_args = CoreCliArgs::parse();
    init_logging(cli_args.verbose);

    if let Err(e) = execute_auto_commit_flow(&cli_args) {
        eprintln!(
            "{} {}",
            style("❌ error:").red().bold(),
            style(&e).red()
        );
        std::process::exit(e.exit_code());
    }
}

/// log output goes to stderr
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("auto_commit_core=debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
