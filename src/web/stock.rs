use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    database::table::price_record::PriceRecord, error::LookupError, logging,
    service::stock_price::StockPriceService,
};

/// 對外只回報「無法取得價格」，詳細原因寫進錯誤日誌
const UNAVAILABLE: &str = "unable to obtain price";

/// `GET /stocks/{symbol}`
pub async fn latest(
    State(service): State<Arc<StockPriceService>>,
    Path(stock_symbol): Path<String>,
) -> Result<Json<PriceRecord>, ApiError> {
    Ok(Json(service.get_latest(&stock_symbol).await?))
}

pub struct ApiError(LookupError);

impl From<LookupError> for ApiError {
    fn from(why: LookupError) -> Self {
        ApiError(why)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LookupError::Fetch { .. } => {
                logging::warn_file_async(format!("Failed to get_latest because {:?}", self.0));
                StatusCode::BAD_GATEWAY
            }
            LookupError::Store(_) => {
                logging::error_file_async(format!("Failed to get_latest because {:?}", self.0));
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": UNAVAILABLE }))).into_response()
    }
}
