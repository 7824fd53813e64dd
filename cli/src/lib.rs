//! Host side of the Suiknit API probe.
//!
//! # Overview
//! Executes the requests built by `suiknit-core` with a blocking `ureq`
//! agent and writes a human-readable report. Nothing here retries: every
//! failure becomes a line in the report and the run moves on.

pub mod args;
pub mod resolver;
pub mod runner;
pub mod scenario;
pub mod session;

pub use args::Args;
pub use runner::Runner;
pub use scenario::{run, run_with_candidates, Scenario};
pub use session::{Session, StreamedResponse, TransportError};
