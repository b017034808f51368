use thiserror::Error;

/// 從報價頁面取價失敗的原因
///
/// 服務層不會依原因分流，保留下來只為了寫進日誌。
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build the http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid css selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("element `{selector}` not found in {url}")]
    ElementNotFound { selector: String, url: String },

    #[error("failed to parse `{text}` as a price: {source}")]
    Parse {
        text: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// 查詢最新股價時的錯誤
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unable to obtain price for {symbol}")]
    Fetch {
        symbol: String,
        #[source]
        source: FetchError,
    },

    #[error("price store failed: {0:#}")]
    Store(anyhow::Error),
}
