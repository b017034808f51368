use std::{env, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use config::{Config as config_config, File as config_file};
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "app.json";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub postgresql: PostgreSQL,
    #[serde(default)]
    pub system: System,
    #[serde(default)]
    pub quote: Quote,
}

const SYSTEM_HTTP_USE_PORT: &str = "SYSTEM_HTTP_USE_PORT";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct System {
    #[serde(default = "System::default_http_use_port")]
    pub http_use_port: u16,
}

impl System {
    fn default_http_use_port() -> u16 {
        8080
    }
}

impl Default for System {
    fn default() -> Self {
        System {
            http_use_port: Self::default_http_use_port(),
        }
    }
}

const POSTGRESQL_HOST: &str = "POSTGRESQL_HOST";
const POSTGRESQL_PORT: &str = "POSTGRESQL_PORT";
const POSTGRESQL_USER: &str = "POSTGRESQL_USER";
const POSTGRESQL_PASSWORD: &str = "POSTGRESQL_PASSWORD";
const POSTGRESQL_DB: &str = "POSTGRESQL_DB";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PostgreSQL {
    pub host: String,
    pub port: i32,
    pub user: String,
    pub password: String,
    pub db: String,
}

impl PostgreSQL {
    /// 組出 sqlx 使用的連線字串
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?application_name=stock_price_service",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.db
        )
    }
}

impl Default for PostgreSQL {
    fn default() -> Self {
        PostgreSQL {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            db: "stock".to_string(),
        }
    }
}

const QUOTE_URL_TEMPLATE: &str = "QUOTE_URL_TEMPLATE";
const QUOTE_SELECTOR: &str = "QUOTE_SELECTOR";
const QUOTE_TIMEOUT_SECS: &str = "QUOTE_TIMEOUT_SECS";

/// 報價頁面的抓取設定，頁面結構變動時只需要改設定
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Quote {
    /// 報價頁網址，`{symbol}` 會被替換成股票代號
    pub url_template: String,
    /// 價格所在元素的 CSS selector
    pub selector: String,
    pub timeout_secs: u64,
}

impl Default for Quote {
    fn default() -> Self {
        Quote {
            url_template: "https://finance.yahoo.com/quote/{symbol}".to_string(),
            selector: r#"fin-streamer[data-field="regularMarketPrice"]"#.to_string(),
            timeout_secs: 15,
        }
    }
}

impl App {
    /// 讀取設定，有 app.json 時以檔案為主，再以 env 覆蓋
    pub fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()
                .context("Failed to build config from app.json")?
                .try_deserialize()
                .context("Failed to deserialize app.json")?;
            return Ok(config.override_with_env());
        }

        Ok(App::from_env())
    }

    /// 從 env 中讀取設定值，未設定的欄位使用預設值
    fn from_env() -> Self {
        App::default().override_with_env()
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(port) = env::var(SYSTEM_HTTP_USE_PORT) {
            self.system.http_use_port =
                u16::from_str(&port).unwrap_or_else(|_| System::default_http_use_port());
        }

        if let Ok(host) = env::var(POSTGRESQL_HOST) {
            self.postgresql.host = host;
        }

        if let Ok(port) = env::var(POSTGRESQL_PORT) {
            self.postgresql.port = i32::from_str(&port).unwrap_or(5432);
        }

        if let Ok(user) = env::var(POSTGRESQL_USER) {
            self.postgresql.user = user;
        }

        if let Ok(password) = env::var(POSTGRESQL_PASSWORD) {
            self.postgresql.password = password;
        }

        if let Ok(db) = env::var(POSTGRESQL_DB) {
            self.postgresql.db = db;
        }

        if let Ok(url_template) = env::var(QUOTE_URL_TEMPLATE) {
            self.quote.url_template = url_template;
        }

        if let Ok(selector) = env::var(QUOTE_SELECTOR) {
            self.quote.selector = selector;
        }

        if let Ok(secs) = env::var(QUOTE_TIMEOUT_SECS) {
            self.quote.timeout_secs =
                u64::from_str(&secs).unwrap_or_else(|_| Quote::default().timeout_secs);
        }

        self
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
