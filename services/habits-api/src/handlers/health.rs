/// Health check endpoint
///
/// Returns "ok" if the service is running.
pub async fn health() -> &'static str {
    "ok"
}
