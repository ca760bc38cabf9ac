pub mod browse;
pub mod cities;
pub mod counties;
pub mod dispatch;
pub mod lookup;
pub mod provinces;

use regio_resolve::ResolveError;

use crate::progress::Progress;

/// Run a resolve behind a spinner, mapping failures to the user-facing message.
pub async fn load<T>(
    what: &str,
    fut: impl Future<Output = Result<T, ResolveError>>,
) -> anyhow::Result<T> {
    let progress = Progress::spinner(&format!("Loading {what}..."));
    match fut.await {
        Ok(rows) => {
            progress.finish_clear();
            Ok(rows)
        }
        Err(error) => {
            progress.finish_err(error.user_message());
            tracing::warn!(%error, what, "resolve failed");
            Err(anyhow::anyhow!(error.user_message()))
        }
    }
}
