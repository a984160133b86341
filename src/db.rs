use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::domain::StoreError;
use crate::store::SnapshotCache;

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub cache: Arc<SnapshotCache>,
}

/// Open the read-only connection pool to the `seperlima` store.
///
/// The store specifies no timeout of its own, so explicit connect and
/// acquire timeouts are set here; a hung database fails the page instead of
/// hanging it.
pub async fn init_db(database_url: &str, timeout_secs: u64) -> Result<DatabaseConnection, StoreError> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(Duration::from_secs(timeout_secs))
        .acquire_timeout(Duration::from_secs(timeout_secs))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Ok(db)
}
