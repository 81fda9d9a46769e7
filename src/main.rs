use clap::Parser;

use gh_release::cli::{orchestration, Args};
use gh_release::ui;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = orchestration::run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise only warnings, or everything down to debug with `-v`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
