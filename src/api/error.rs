use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::data_provider::UpstreamError;

/// API 錯誤，對應到各路由的失敗回應主體
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 上游請求失敗
    #[error("{0}")]
    Upstream(#[from] UpstreamError),

    /// 單一資產路由取得空資料
    #[error("{0}")]
    NoData(String),

    /// 合併路由任一方沒有資料
    #[error("No data available")]
    CombinedNoData { details: String },

    /// 查詢參數不合法
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::CombinedNoData { details } => json!({
                "error": self.to_string(),
                "details": details,
            }),
            _ => json!({
                "error": self.to_string(),
                "success": false,
            }),
        };
        (self.status(), Json(body)).into_response()
    }
}
