use chrono_tz::Tz;

use crate::booking::BookingPolicy;

/// 服务器配置 - 预订引擎的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/booking | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | TIMEZONE | Europe/Madrid | 业务时区 (chrono-tz 名称) |
/// | SERVICE_DURATION_MIN | 120 | 默认用餐时长 (分钟) |
/// | MIN_LEAD_TIME_MIN | 30 | 当日预订最小提前量 (分钟) |
/// | CAPACITY_TOLERANCE | 2 | 拼桌容量冗余 (座位数) |
/// | LOG_LEVEL | info | 日志级别 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/booking HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 业务时区 (chrono-tz 名称)
    pub timezone: String,
    /// 默认用餐时长 (分钟)，未显式给出结束时间时推导窗口
    pub service_duration_min: i64,
    /// 当日预订最小提前量 (分钟)，留给门店备台
    pub min_lead_time_min: i64,
    /// 拼桌容量冗余 (座位数) — 产品策略，可配置
    pub capacity_tolerance: i32,
    /// 日志级别
    pub log_level: String,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/booking".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone: std::env::var("TIMEZONE").unwrap_or_else(|_| "Europe/Madrid".into()),
            service_duration_min: std::env::var("SERVICE_DURATION_MIN")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(120),
            min_lead_time_min: std::env::var("MIN_LEAD_TIME_MIN")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            capacity_tolerance: std::env::var("CAPACITY_TOLERANCE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(2),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 业务时区；无法解析时回退 UTC
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %self.timezone, "Unknown timezone, falling back to UTC");
            chrono_tz::UTC
        })
    }

    /// 预订策略快照
    pub fn policy(&self) -> BookingPolicy {
        BookingPolicy {
            service_duration_min: self.service_duration_min,
            min_lead_time_min: self.min_lead_time_min,
            capacity_tolerance: self.capacity_tolerance,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
