use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use reqwest::{Client, Method, Response};

use crate::{error::FetchError, logging::Logger, util};

pub mod element;
pub mod user_agent;

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// 建立連線的逾時上限
const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);

/// Builds the reqwest client used to visit quote pages.
///
/// The whole request (connect, send, read body) is bounded by `timeout`.
///
/// # Errors
///
/// Returns [`FetchError::Client`] when the TLS backend or the client cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    util::ensure_rustls_crypto_provider();

    Client::builder()
        // ===== 壓縮 =====
        .brotli(true)
        .gzip(true)
        // ===== 超時設置 =====
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .timeout(timeout)
        // ===== 連接池 =====
        .pool_max_idle_per_host(20)
        .pool_idle_timeout(Duration::from_secs(90))
        // ===== Cookie 和重定向 =====
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::limited(5))
        // ===== Headers =====
        .user_agent(user_agent::gen_random_ua())
        .build()
        .map_err(FetchError::Client)
}

/// Performs an HTTP GET request and returns the response as text.
///
/// Any non-success status is reported as [`FetchError::Status`]; the body of
/// an error page is never handed to the caller.
pub async fn get(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = send(client, Method::GET, url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })
}

/// Sends a single request, logging method, url, status and latency to `log/*-http.log`.
///
/// No retry is attempted: a failed attempt is returned to the caller as is.
async fn send(client: &Client, method: Method, url: &str) -> Result<Response, FetchError> {
    let visit_log = format!("{method}:{url}");
    let rb = client.request(method, url);
    let start = Instant::now();
    let res = rb.send().await;
    let elapsed = start.elapsed().as_millis();

    match res {
        Ok(response) => {
            LOGGER.info(format!("{} {} {} ms", visit_log, response.status(), elapsed));
            Ok(response)
        }
        Err(why) => {
            LOGGER.error(format!("{} failed because {:?}. {} ms", visit_log, why, elapsed));
            Err(FetchError::Transport {
                url: url.to_string(),
                source: why,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::get as route_get, Router};
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_get() {
        let base = serve(Router::new().route("/quote", route_get(|| async { "<p>1.5</p>" }))).await;
        let client = build_client(Duration::from_secs(5)).unwrap();

        let body = get(&client, &format!("{}/quote", base)).await.unwrap();
        assert_eq!(body, "<p>1.5</p>");
    }

    #[tokio::test]
    async fn test_get_error_status() {
        let base = serve(Router::new().route(
            "/quote",
            route_get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        ))
        .await;
        let client = build_client(Duration::from_secs(5)).unwrap();

        match get(&client, &format!("{}/quote", base)).await {
            Err(FetchError::Status { status, .. }) => {
                assert_eq!(status.as_u16(), 503);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_timeout() {
        let base = serve(Router::new().route(
            "/slow",
            route_get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        ))
        .await;
        let client = build_client(Duration::from_millis(200)).unwrap();

        let result = get(&client, &format!("{}/slow", base)).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_get_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = build_client(Duration::from_secs(2)).unwrap();

        let result = get(&client, &format!("http://{}/quote", addr)).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
