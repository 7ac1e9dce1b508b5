//! Connection health probe backing the readiness endpoint.

use mongodb::{Client, bson::doc};
use tracing::debug;

/// Ping the deployment; `true` when the server answers.
///
/// The `/ready` probe wants a boolean, not an error to unpack, so failures
/// are logged here and collapsed to `false`.
pub async fn check_health(client: &Client) -> bool {
    match client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
    {
        Ok(_) => true,
        Err(e) => {
            debug!("MongoDB ping failed: {}", e);
            false
        }
    }
}
