// src/interrupt.rs

use std::io;

use tracing::warn;

/// Drives `work` until it finishes or `interrupt` fires.
///
/// Returns `None` when interrupted. If the interrupt listener itself fails
/// (e.g. the Ctrl-C handler cannot be installed), the failure is logged and
/// `work` runs to completion.
pub async fn run_until_interrupted<F, I>(work: F, interrupt: I) -> Option<F::Output>
where
    F: Future,
    I: Future<Output = io::Result<()>>,
{
    tokio::pin!(work);

    tokio::select! {
        output = &mut work => Some(output),
        signal = interrupt => match signal {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Cannot listen for Ctrl-C; the run can't be interrupted");
                Some(work.await)
            }
        },
    }
}
