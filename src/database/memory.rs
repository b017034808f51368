use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::database::{table::price_record::PriceRecord, PriceStore};

/// 以記憶體保存的 [`PriceStore`]，供測試替代 PostgreSQL
#[derive(Default)]
pub struct MemoryPriceStore {
    rows: Mutex<Vec<PriceRecord>>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 目前所有紀錄的複本，依寫入順序排列
    pub fn rows(&self) -> Vec<PriceRecord> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PriceStore for MemoryPriceStore {
    async fn find_latest(&self, symbol: &str) -> Result<Option<PriceRecord>> {
        let rows = self.rows.lock().map_err(|_| anyhow!("Lock error"))?;
        Ok(rows
            .iter()
            .filter(|row| row.symbol == symbol)
            .max_by(|a, b| {
                a.retrieved_at
                    .cmp(&b.retrieved_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned())
    }

    async fn save(&self, mut record: PriceRecord) -> Result<PriceRecord> {
        let mut rows = self.rows.lock().map_err(|_| anyhow!("Lock error"))?;
        record.id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        rows.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeDelta};
    use rust_decimal_macros::dec;

    use super::*;

    #[tokio::test]
    async fn test_save_then_find_latest() {
        let store = MemoryPriceStore::new();

        let saved = store
            .save(PriceRecord::new("ACME".to_string(), dec!(123.45)))
            .await
            .unwrap();
        assert_eq!(saved.id, 1);

        let latest = store.find_latest("ACME").await.unwrap().unwrap();
        assert_eq!(latest.symbol, "ACME");
        assert_eq!(latest.price, dec!(123.45));
        assert!(store.find_latest("acme").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_latest_orders_by_retrieved_at() {
        let store = MemoryPriceStore::new();
        let now = Local::now();

        for (price, hours_ago) in [(dec!(3), 0), (dec!(1), 2), (dec!(2), 1)] {
            let mut record = PriceRecord::new("ACME".to_string(), price);
            record.retrieved_at = now - TimeDelta::hours(hours_ago);
            store.save(record).await.unwrap();
        }
        store
            .save(PriceRecord::new("OTHER".to_string(), dec!(99)))
            .await
            .unwrap();

        let latest = store.find_latest("ACME").await.unwrap().unwrap();
        assert_eq!(latest.price, dec!(3));
        assert_eq!(latest.id, 1);
    }

    #[tokio::test]
    async fn test_find_latest_tie_prefers_higher_id() {
        let store = MemoryPriceStore::new();
        let now = Local::now();

        for price in [dec!(10), dec!(11)] {
            let mut record = PriceRecord::new("ACME".to_string(), price);
            record.retrieved_at = now;
            store.save(record).await.unwrap();
        }

        let latest = store.find_latest("ACME").await.unwrap().unwrap();
        assert_eq!(latest.id, 2);
        assert_eq!(latest.price, dec!(11));
    }
}
