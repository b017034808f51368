//! # Yahoo 財經採集模組
//!
//! 從 Yahoo Finance 的報價頁抓取最新成交價。
//!
//! - 網址：`config::Quote::url_template`，預設 `https://finance.yahoo.com/quote/{symbol}`
//! - 抓取技術：HTTP GET 搭配 CSS Selector 解析，預設
//!   `fin-streamer[data-field="regularMarketPrice"]`

use std::time::Duration;

use reqwest::Client;

use crate::{config, error::FetchError, util};

/// 即時報價採集子模組
pub mod price;

/// 網址樣板中代表股票代號的佔位字串
const SYMBOL_PLACEHOLDER: &str = "{symbol}";

/// Yahoo 財經採集器
pub struct Yahoo {
    client: Client,
    url_template: String,
    selector: String,
}

impl Yahoo {
    pub fn new(settings: &config::Quote) -> Result<Self, FetchError> {
        let client = util::http::build_client(Duration::from_secs(settings.timeout_secs))?;

        Ok(Yahoo {
            client,
            url_template: settings.url_template.clone(),
            selector: settings.selector.clone(),
        })
    }

    /// 依樣板組出報價頁網址，代號會做 percent-encoding（例如 `^GSPC`）
    fn quote_url(&self, stock_symbol: &str) -> String {
        self.url_template
            .replace(SYMBOL_PLACEHOLDER, &urlencoding::encode(stock_symbol))
    }
}
