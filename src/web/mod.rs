use std::{future::Future, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;

use crate::{logging, service::stock_price::StockPriceService};

pub mod stock;

/// 組出對外的路由，`/api/stocks/{symbol}` 與 `/stocks/{symbol}` 指向同一個 handler
pub fn router(service: Arc<StockPriceService>) -> Router {
    Router::new()
        .route("/stocks/{symbol}", get(stock::latest))
        .route("/api/stocks/{symbol}", get(stock::latest))
        .with_state(service)
}

/// 啟動 HTTP 服務，直到 `shutdown` 完成後優雅停止
pub async fn serve(
    addr: SocketAddr,
    service: Arc<StockPriceService>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind http server at {addr}"))?;

    serve_on(listener, service, shutdown).await
}

/// 在已綁定的 listener 上提供服務
pub async fn serve_on(
    listener: TcpListener,
    service: Arc<StockPriceService>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = listener.local_addr()?;
    logging::info_file_async(format!("HTTP 伺服器正在 {:?} 開始服務...", addr));

    let result = axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await;

    match &result {
        Ok(_) => logging::info_file_async(format!("HTTP 伺服器在 {:?} 正常停止", addr)),
        Err(why) => {
            logging::error_file_async(format!("HTTP 伺服器運行中斷 ({:?}): {}", addr, why))
        }
    }

    result.context("http server terminated with error")
}
