use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database::{PostgresSQL, PriceStore};

/// 某檔股票在某個時間點抓到的價格（`price_record`）。
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// 資料庫配發的流水號，尚未寫入時為 0
    pub id: i64,
    /// 股票代號，保留原本的大小寫
    pub symbol: String,
    /// JSON 輸出為數字，保留原本的位數
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    /// 抓取時間
    pub retrieved_at: DateTime<Local>,
}

impl PriceRecord {
    /// 建立一筆尚未寫入的紀錄，抓取時間為現在
    pub fn new(symbol: String, price: Decimal) -> Self {
        PriceRecord {
            id: 0,
            symbol,
            price,
            retrieved_at: Local::now(),
        }
    }
}

#[async_trait]
impl PriceStore for PostgresSQL {
    async fn find_latest(&self, symbol: &str) -> Result<Option<PriceRecord>> {
        sqlx::query_as::<_, PriceRecord>(
            r#"
SELECT id, symbol, price, retrieved_at
FROM price_record
WHERE symbol = $1
ORDER BY retrieved_at DESC, id DESC
LIMIT 1
"#,
        )
        .bind(symbol)
        .fetch_optional(self.pool())
        .await
        .with_context(|| format!("Failed to PriceRecord::find_latest({}) from database", symbol))
    }

    async fn save(&self, record: PriceRecord) -> Result<PriceRecord> {
        sqlx::query_as::<_, PriceRecord>(
            r#"
INSERT INTO price_record (symbol, price, retrieved_at)
VALUES ($1, $2, $3)
RETURNING id, symbol, price, retrieved_at
"#,
        )
        .bind(&record.symbol)
        .bind(record.price)
        .bind(record.retrieved_at)
        .fetch_one(self.pool())
        .await
        .with_context(|| format!("Failed to PriceRecord::save({:?}) from database", record))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;

    use crate::{config, logging};

    use super::*;

    #[test]
    fn test_json_shape() {
        let record = PriceRecord {
            id: 7,
            symbol: "ACME".to_string(),
            price: dec!(123.45),
            retrieved_at: Local::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["symbol"], "ACME");
        assert!(json["price"].is_number());
        assert_eq!(json["price"].to_string(), "123.45");
        assert!(json["retrievedAt"].is_string());
        assert!(json.get("retrieved_at").is_none());
    }

    #[test]
    fn test_json_price_keeps_precision() {
        let record = PriceRecord::new("BRK-A".to_string(), dec!(712345.123456789012345678));

        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains(r#""price":712345.123456789012345678"#), "{}", text);

        let back: PriceRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back.price, dec!(712345.123456789012345678));
        assert_eq!(back, record);
    }

    async fn open() -> PostgresSQL {
        dotenv::dotenv().ok();
        let settings = config::App::get().unwrap();
        let db = PostgresSQL::new(&settings.postgresql).unwrap();
        db.ensure_schema().await.unwrap();
        db
    }

    #[tokio::test]
    #[ignore]
    async fn test_save_then_find_latest() {
        let db = open().await;
        let symbol = format!("T{}", Local::now().timestamp_micros());

        let saved = db
            .save(PriceRecord::new(symbol.clone(), dec!(98765.4321)))
            .await
            .unwrap();
        assert!(saved.id > 0);

        let latest = db.find_latest(&symbol).await.unwrap().unwrap();
        assert_eq!(latest.id, saved.id);
        assert_eq!(latest.symbol, symbol);
        assert_eq!(latest.price, dec!(98765.4321));

        logging::debug_file_async(format!("find_latest: {:#?}", latest));
        db.close().await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_find_latest_orders_by_retrieved_at() {
        let db = open().await;
        let symbol = format!("T{}", Local::now().timestamp_micros());
        let now = Local::now();

        let mut newest = PriceRecord::new(symbol.clone(), dec!(3));
        newest.retrieved_at = now;
        let mut oldest = PriceRecord::new(symbol.clone(), dec!(1));
        oldest.retrieved_at = now - TimeDelta::hours(2);
        let mut middle = PriceRecord::new(symbol.clone(), dec!(2));
        middle.retrieved_at = now - TimeDelta::hours(1);

        // 寫入順序與時間順序不同
        db.save(newest).await.unwrap();
        db.save(oldest).await.unwrap();
        db.save(middle).await.unwrap();

        let latest = db.find_latest(&symbol).await.unwrap().unwrap();
        assert_eq!(latest.price, dec!(3));
        assert!(db.find_latest("NO-SUCH-SYMBOL").await.unwrap().is_none());
        db.close().await;
    }
}
