//! Roster Server - 门店员工排班服务
//!
//! # 架构概述
//!
//! - **排班核心** (`scheduling`): 候选池、自动排班、岗位覆盖校验、复制周、工时计算
//! - **数据库** (`db`): SQLite (sqlx)，内嵌迁移
//! - **HTTP API** (`api`): 门店维度的 RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! roster-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── utils/         # 日志、时间、校验
//! ├── db/            # 连接池与仓储
//! ├── scheduling/    # 排班核心与服务
//! └── api/           # HTTP 路由和处理器
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod scheduling;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use scheduling::ScheduleService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：加载 `.env`、读取配置、初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    let log_dir = (!config.log_dir.is_empty()).then_some(config.log_dir.as_str());
    init_logger_with_file(&config.log_level, config.is_production(), log_dir)?;
    Ok(config)
}
