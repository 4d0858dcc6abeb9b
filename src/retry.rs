use crate::error::Result;
use std::future::Future;

/// Runs `op` until it succeeds, fails with a non-transient error, or has failed `retries + 1` times.
///
/// Attempts after the first are delayed by an exponential backoff. With `retries == 0` this is a plain call.
pub async fn with_retries<T, F, Fut>(retries: u32, what: &'static str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut backoff = maybe_backoff::MaybeBackoff::default();
    let mut attempt = 0;
    loop {
        backoff.sleep().await;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < retries => {
                attempt += 1;
                backoff.arm();
                warn!(?attempt, %err, "{what} failed, retrying...");
            }
            Err(err) => return Err(err),
        }
    }
}
