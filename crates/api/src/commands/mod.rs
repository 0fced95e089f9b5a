//! Commands behind the CLI subcommands
//!
//! Each command is timed and logged through [`log_command_execution`].

pub mod connections;
pub mod platforms;

use std::future::Future;
use std::time::Instant;

use creatorlink_domain::Result;

use crate::utils::logging::log_command_execution;

async fn run_command<T, F>(command: &'static str, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = future.await;
    log_command_execution(command, start.elapsed(), result.as_ref().err());
    result
}
