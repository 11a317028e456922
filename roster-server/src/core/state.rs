use sqlx::SqlitePool;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::scheduling::{ScheduleService, StoreLocks};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (连接池和锁表内部为 Arc)。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | store_locks | StoreLocks | 门店级写锁 |
/// | schedule | ScheduleService | 排班服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 门店级写锁 (排班的读-检查-写序列)
    pub store_locks: StoreLocks,
    /// 排班服务
    pub schedule: ScheduleService,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let store_locks = StoreLocks::new();
        let schedule = ScheduleService::new(pool.clone(), store_locks.clone());
        Self {
            config,
            pool,
            store_locks,
            schedule,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录
    /// 2. 打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        tracing::info!(
            path = %config.database_path,
            environment = %config.environment,
            "Server state initialized"
        );
        Ok(Self::new(config.clone(), db.pool))
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
