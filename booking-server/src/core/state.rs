use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::booking::{AvailabilityService, ReservationService, TableOrderService};
use crate::core::Config;
use crate::db::repository::{
    CatalogRepository, DiningTableRepository, ReservationRepository, TableOrderRepository,
};
use crate::notify::NotificationService;
use crate::reports::ReportService;
use crate::services::CatalogService;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB) |
/// | tables | 桌台登记 (被动引用集) |
/// | availability | 空桌计算 |
/// | reservations | 预订状态机 |
/// | orders | 桌台订单状态机 |
/// | notifier | 通知分发 |
/// | catalog | 菜品/套餐价格协作方 |
/// | reports | 只读报表汇总 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 实例 ID - 每次启动生成，客户端用于检测重启
    pub instance_id: String,
    pub tables: DiningTableRepository,
    pub availability: Arc<AvailabilityService>,
    pub reservations: Arc<ReservationService>,
    pub orders: Arc<TableOrderService>,
    pub notifier: Arc<NotificationService>,
    pub catalog: Arc<CatalogService>,
    pub reports: Arc<ReportService>,
}

impl ServerState {
    /// 打开工作目录下的数据库并装配全部服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = crate::db::open(&config.work_dir).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// 用现有数据库连接装配服务 (测试注入内存引擎)
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let policy = config.policy();
        let tz = config.tz();

        let tables = DiningTableRepository::new(db.clone());
        let reservation_repo = ReservationRepository::new(db.clone());
        let order_repo = TableOrderRepository::new(db.clone());

        let notifier = Arc::new(NotificationService::new(db.clone()));
        let catalog = Arc::new(CatalogService::new(CatalogRepository::new(db.clone())));
        let availability = Arc::new(AvailabilityService::new(
            tables.clone(),
            reservation_repo.clone(),
            policy,
        ));
        let reservations = Arc::new(ReservationService::new(
            reservation_repo.clone(),
            tables.clone(),
            notifier.clone(),
            policy,
        ));
        let orders = Arc::new(TableOrderService::new(
            order_repo.clone(),
            tables.clone(),
            reservation_repo.clone(),
            catalog.clone(),
            notifier.clone(),
        ));
        let reports = Arc::new(ReportService::new(reservation_repo, order_repo, tz));

        let instance_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(instance = %instance_id, "Server state initialized");

        Self {
            config,
            db,
            instance_id,
            tables,
            availability,
            reservations,
            orders,
            notifier,
            catalog,
            reports,
        }
    }
}
