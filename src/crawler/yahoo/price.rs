use async_trait::async_trait;
use rust_decimal::Decimal;
use scraper::Html;

use crate::{
    crawler::{yahoo::Yahoo, PriceFetcher},
    error::FetchError,
    util::{self, http::element::GetOneElementText, text},
};

#[async_trait]
impl PriceFetcher for Yahoo {
    async fn fetch(&self, stock_symbol: &str) -> Result<Decimal, FetchError> {
        let url = self.quote_url(stock_symbol);
        let text = util::http::get(&self.client, &url).await?;

        parse_price(&text, &self.selector, stock_symbol, &url)
    }
}

/// 從報價頁 HTML 取出價格
///
/// `Html` 不是 `Send`，解析必須在同步函式內完成，不能跨過 `.await`。
fn parse_price(
    html: &str,
    selector: &str,
    stock_symbol: &str,
    url: &str,
) -> Result<Decimal, FetchError> {
    let document = Html::parse_document(html);
    let price = util::http::element::get_one_element(GetOneElementText {
        stock_symbol,
        url,
        selector,
        document: &document,
    })?;

    text::parse_decimal(&price, None).map_err(|source| FetchError::Parse {
        text: price,
        source,
    })
}
