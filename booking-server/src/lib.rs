//! Booking Server - 餐厅预订与桌台订单引擎
//!
//! # 架构概述
//!
//! 本模块是预订服务的主入口，提供以下核心功能：
//!
//! - **预订引擎** (`booking`): 空桌计算 + 预订/订单状态机 (唯一有硬不变量的部分)
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **通知** (`notify`): 角色范围的生命周期事件，尽力而为
//! - **报表** (`reports`): 终态记录的只读汇总
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 操作者上下文、角色守卫
//! ├── booking/       # 预订与订单状态机、空桌计算
//! ├── services/      # 目录价格协作方
//! ├── notify/        # 通知分发
//! ├── reports/       # 报表汇总
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod notify;
pub mod reports;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use booking::{
    AvailabilityService, BookingError, BookingPolicy, BookingResult, ReservationService,
    TableOrderService,
};
pub use core::{Config, Server, ServerState};
pub use notify::NotificationService;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    "#
    );
}
