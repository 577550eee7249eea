//! Write retry policy.

use std::future::Future;
use std::time::Duration;

use bp_core::ports::StorageError;

const WRITE_ATTEMPTS: u32 = 3;
const BACKOFF_STEP: Duration = Duration::from_millis(20);

/// Run a write, retrying transient I/O failures with linear backoff.
///
/// Only [`StorageError::Io`] is retried; encode failures and conflicts are
/// deterministic and fail immediately. Reads are never retried.
pub(crate) async fn with_write_retry<F, Fut, T>(op_name: &str, mut op: F) -> Result<T, StorageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StorageError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err @ StorageError::Io(_)) if attempt < WRITE_ATTEMPTS => {
                log::warn!("{op_name} failed on attempt {attempt}: {err}");
                tokio::time::sleep(BACKOFF_STEP * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
