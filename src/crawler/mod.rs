use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::FetchError;

/// 雅虎財經
pub mod yahoo;

/// 從外部網站取得股票目前的報價
///
/// 網頁結構的細節都封裝在實作內，換站或改版時服務層不受影響。
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    async fn fetch(&self, stock_symbol: &str) -> Result<Decimal, FetchError>;
}
