use std::future::Future;
use std::time::Duration;

/// Await `fut`, failing with a contextual error if it does not finish within `limit`.
///
/// The inner future is dropped on expiry, which cancels any in-flight I/O.
pub async fn with_deadline<F, T, E>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            let err: anyhow::Error = e.into();
            Err(err.context(operation))
        }
        Err(_) => Err(anyhow::anyhow!("{operation}: timed out after {limit:?}")),
    }
}
