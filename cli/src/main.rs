use std::process::ExitCode;

use clap::Parser;
use suiknit_core::SessionConfig;
use suiknit_probe::{scenario, Args, Session};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let session = Session::new(SessionConfig::new(&args.token));

    let mut stdout = std::io::stdout().lock();
    match scenario::run(&session, &args.scenario(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to write report");
            ExitCode::FAILURE
        }
    }
}
