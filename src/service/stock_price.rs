use std::sync::Arc;

use crate::{
    crawler::PriceFetcher,
    database::{table::price_record::PriceRecord, PriceStore},
    error::LookupError,
    logging,
};

/// 查詢股票最新價格：先查資料庫，沒有資料才到報價頁抓取並寫入
pub struct StockPriceService {
    store: Arc<dyn PriceStore>,
    fetcher: Arc<dyn PriceFetcher>,
}

impl StockPriceService {
    pub fn new(store: Arc<dyn PriceStore>, fetcher: Arc<dyn PriceFetcher>) -> Self {
        StockPriceService { store, fetcher }
    }

    /// 取得指定股票最新的一筆價格紀錄
    ///
    /// 已有紀錄時原樣回傳，不檢查新舊。抓取失敗時不寫入任何資料，也不重試。
    pub async fn get_latest(&self, stock_symbol: &str) -> Result<PriceRecord, LookupError> {
        if let Some(record) = self
            .store
            .find_latest(stock_symbol)
            .await
            .map_err(LookupError::Store)?
        {
            return Ok(record);
        }

        let price = self
            .fetcher
            .fetch(stock_symbol)
            .await
            .map_err(|source| LookupError::Fetch {
                symbol: stock_symbol.to_string(),
                source,
            })?;

        let record = self
            .store
            .save(PriceRecord::new(stock_symbol.to_string(), price))
            .await
            .map_err(LookupError::Store)?;

        logging::info_file_async(format!(
            "{} 無價格紀錄，已抓取並寫入 {} (id:{})",
            stock_symbol, record.price, record.id
        ));

        Ok(record)
    }
}
