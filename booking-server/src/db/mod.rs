//! Database Module
//!
//! Embedded SurrealDB storage. Tables are schemaless and defined by use;
//! the engine's serialized write path provides the booking-conflict
//! guarantee, not a storage constraint.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Namespace / database used by the server
const NAMESPACE: &str = "booking";
const DATABASE: &str = "main";

/// Open the embedded database under the work dir
pub async fn open(work_dir: &str) -> Result<Surreal<Db>, AppError> {
    let path = format!("{}/data", work_dir);
    let db = Surreal::new::<RocksDb>(path.as_str())
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;
    tracing::info!(path = %path, "Database connection established (SurrealDB embedded)");
    Ok(db)
}

#[cfg(test)]
mod tests {
    #[tokio::test]
    async fn test_open_creates_database_under_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = super::open(dir.path().to_str().unwrap()).await.unwrap();
        db.query("RETURN 1").await.unwrap();
        assert!(dir.path().join("data").exists());
    }
}
