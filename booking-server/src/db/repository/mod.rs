//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod catalog;
pub mod dining_table;
pub mod notification;
pub mod reservation;
pub mod table_order;

// Re-exports
pub use catalog::CatalogRepository;
pub use dining_table::DiningTableRepository;
pub use notification::NotificationRepository;
pub use reservation::ReservationRepository;
pub use table_order::TableOrderRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "reservation:abc".parse()?;
//   - 获取纯ID: id.key().to_string()
//   - 跨实体引用一律存储 "table:id" 字符串，查询时在 Rust 侧过滤

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
