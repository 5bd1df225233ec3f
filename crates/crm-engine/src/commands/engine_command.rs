//! Engine-level action commands.

use crm_core::clock::Clock;
use crm_core::errors::Result;
use crm_core::{apply, log_op_end, log_op_error, log_op_start, Command, CommandOutcome, RecordStore};

/// Apply a command inside a logged boundary.
///
/// # Errors
///
/// Returns the operation's error unchanged after logging it.
pub fn apply_engine_command<S: RecordStore, C: Clock>(
    cmd: Command,
    store: &mut S,
    clock: &C,
) -> Result<CommandOutcome> {
    let op = cmd.op_name();
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = apply(store, clock, cmd);

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => log_op_end!(op, duration_ms = elapsed, batch_len = outcome.ids().len()),
        Err(e) => log_op_error!(op, e.clone(), duration_ms = elapsed),
    }
    result
}
