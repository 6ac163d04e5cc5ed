//! Shared types for the booking server and its clients
//!
//! # 内容
//!
//! - **models**: 预订/桌台订单的状态枚举和请求载荷
//! - **types**: 角色与操作者上下文
//! - **util**: 时间戳、预订码、区间重叠等纯函数

pub mod models;
pub mod types;
pub mod util;

// Re-export 公共类型
pub use models::{
    NotificationKind, PaymentStatus, RecipientScope, ReservationStatus, TableOrderStatus,
};
pub use types::{Actor, Role};
pub use util::{now_millis, windows_overlap};
