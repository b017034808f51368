use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{config, database::table::price_record::PriceRecord, logging};

#[cfg(test)]
pub mod memory;
pub mod table;

/// 股價紀錄的存取介面
///
/// 只有新增與查詢最新一筆，沒有更新或刪除。
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// 取得指定股票 `retrieved_at` 最新的一筆紀錄
    async fn find_latest(&self, symbol: &str) -> Result<Option<PriceRecord>>;

    /// 寫入一筆紀錄並回傳含資料庫配發 `id` 的結果
    async fn save(&self, record: PriceRecord) -> Result<PriceRecord>;
}

/// PostgreSQL 連線池封裝。
///
/// 由 `main` 建立後傳給需要的元件，結束時呼叫 [`PostgresSQL::close`]。
#[derive(Clone)]
pub struct PostgresSQL {
    pool: PgPool,
}

impl PostgresSQL {
    /// 建立 PostgreSQL 連線池，實際連線延後到第一次查詢。
    ///
    /// # Errors
    /// 連線字串無法解析時回傳錯誤。
    pub fn new(settings: &config::PostgreSQL) -> Result<PostgresSQL> {
        let pool = PgPoolOptions::new()
            .max_lifetime(Some(Duration::from_secs(1800))) // 30 分鐘
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Some(Duration::from_secs(600))) // 10 分鐘
            .connect_lazy(&settings.database_url())
            .with_context(|| {
                format!(
                    "wrong database URL postgres://{}@{}:{}/{}",
                    settings.user, settings.host, settings.port, settings.db
                )
            })?;

        Ok(Self { pool })
    }

    /// 取得連線池參考。
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 建立 `price_record` 資料表與查詢最新一筆用的索引
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
CREATE TABLE IF NOT EXISTS price_record (
    id           BIGSERIAL PRIMARY KEY,
    symbol       TEXT        NOT NULL,
    price        NUMERIC     NOT NULL,
    retrieved_at TIMESTAMPTZ NOT NULL
)"#,
        )
        .execute(self.pool())
        .await
        .context("Failed to create table price_record")?;

        sqlx::query(
            r#"
CREATE INDEX IF NOT EXISTS price_record_symbol_retrieved_at_idx
    ON price_record (symbol, retrieved_at DESC, id DESC)"#,
        )
        .execute(self.pool())
        .await
        .context("Failed to create index on price_record")?;

        Ok(())
    }

    /// 關閉連線池，等待使用中的連線歸還
    pub async fn close(&self) {
        self.pool.close().await;
        logging::info_file_async("PostgreSQL 連線池已關閉".to_string());
    }
}
