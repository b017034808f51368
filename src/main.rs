use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};

use crate::{
    crawler::yahoo::Yahoo, database::PostgresSQL, service::stock_price::StockPriceService,
};

pub mod config;
pub mod crawler;
pub mod database;
pub mod error;
pub mod logging;
pub mod service;
pub mod util;
pub mod web;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if let Err(why) = run().await {
        logging::error_file_async(format!("服務啟動失敗 {:?}", why));
        logging::error_console(format!("{:?}", why));
        // 讓背景線程把錯誤寫進檔案
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        return Err(why);
    }

    Ok(())
}

async fn run() -> Result<()> {
    let settings = config::App::get()?;
    util::ensure_rustls_crypto_provider();

    let db = PostgresSQL::new(&settings.postgresql)?;
    db.ensure_schema()
        .await
        .context("Failed to prepare the price_record table")?;

    let yahoo = Yahoo::new(&settings.quote).context("Failed to create the quote crawler")?;
    let service = Arc::new(StockPriceService::new(
        Arc::new(db.clone()),
        Arc::new(yahoo),
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.system.http_use_port));
    logging::info_console(format!("啟動 HTTP({:?}) 服務", addr));

    let result = web::serve(addr, service, shutdown_signal()).await;
    db.close().await;
    logging::info_console("服務已停止".to_string());

    result
}

async fn shutdown_signal() {
    if let Err(why) = tokio::signal::ctrl_c().await {
        logging::error_file_async(format!("Failed to listen for ctrl_c because {:?}", why));
        std::future::pending::<()>().await;
    }
    logging::info_file_async("收到停止訊號".to_string());
}
