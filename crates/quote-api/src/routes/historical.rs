//! 과거 시세 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /api/historical/{symbol}?period=1m` - 일봉 시계열 조회
//!
//! 응답의 `source`는 캐시 적중 여부(`cache` | `api`)를 나타내며,
//! `meta`는 업스트림에서 새로 가져온 경우에만 포함됩니다.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use quote_data::{DataError, DataSource, OhlcvBar, SeriesMeta};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::first_param;
use crate::error::{ApiErrorResponse, ApiResult, FETCH_FAILED_MESSAGE};
use crate::state::AppState;

/// 조회 쿼리.
#[derive(Debug, Default)]
pub struct HistoricalQuery {
    /// 기간 키워드 (1w, 2w, 1m, 3m, 6m, 1y)
    pub period: Option<String>,
}

impl From<Vec<(String, String)>> for HistoricalQuery {
    fn from(params: Vec<(String, String)>) -> Self {
        Self {
            period: first_param(&params, "period"),
        }
    }
}

/// 과거 시세 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoricalResponse {
    pub success: bool,
    /// 오래된 순 일봉
    pub data: Vec<OhlcvBar>,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<SeriesMeta>,
}

/// 과거 시세 조회.
///
/// GET /api/historical/{symbol}
pub async fn get_historical(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<HistoricalResponse>> {
    let query = HistoricalQuery::from(params);
    let series = state
        .gateway
        .get_history(&symbol, query.period.as_deref())
        .await
        .map_err(|e| historical_error(&symbol, e))?;

    Ok(Json(HistoricalResponse {
        success: true,
        data: Arc::unwrap_or_clone(series.data),
        source: series.source,
        meta: series.meta,
    }))
}

/// 게이트웨이 오류를 응답으로 변환.
///
/// - 업스트림 거부 → 404, 업스트림 메시지 그대로
/// - 연결/파싱 실패 → 500, 고정 메시지 (원문은 로그에만)
fn historical_error(symbol: &str, err: DataError) -> (StatusCode, Json<ApiErrorResponse>) {
    match err {
        DataError::NotFound(message) => {
            warn!(symbol = %symbol, message = %message, "종목 시세 없음");
            ApiErrorResponse::new(message).with_status(StatusCode::NOT_FOUND)
        }
        other => {
            error!(symbol = %symbol, error = %other, "시세 조회 실패");
            ApiErrorResponse::new(FETCH_FAILED_MESSAGE)
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// 과거 시세 라우터 생성.
pub fn historical_router() -> Router<Arc<AppState>> {
    Router::new().route("/historical/{symbol}", get(get_historical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{create_test_state, StubSource};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const AAPL_BODY: &str = r#"{
        "meta": {"symbol": "AAPL", "exchange": "NASDAQ", "currency": "USD"},
        "values": [
            {"datetime": "2024-01-03", "open": "184.22", "high": "185.88",
             "low": "183.43", "close": "184.25", "volume": "58414500"},
            {"datetime": "2024-01-02", "open": "187.15", "high": "188.44",
             "low": "183.89", "close": "185.64", "volume": "n/a"}
        ],
        "status": "ok"
    }"#;

    fn app(source: Arc<StubSource>) -> Router {
        historical_router().with_state(Arc::new(create_test_state(source)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_fresh_fetch_then_cache() {
        let source = StubSource::json(AAPL_BODY);
        let app = app(source.clone());

        let (status, json) = get_json(app.clone(), "/historical/AAPL?period=1w").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["source"], "api");
        assert_eq!(json["data"][0]["time"], "2024-01-02");
        assert_eq!(json["data"][0]["volume"], 0);
        assert_eq!(json["data"][1]["close"], 184.25);
        assert_eq!(json["meta"]["exchange"], "NASDAQ");

        let (status, json) = get_json(app, "/historical/AAPL?period=1w").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "cache");
        assert!(json.get("meta").is_none());
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_repeated_period_uses_first_value() {
        let source = StubSource::json(AAPL_BODY);
        let app = app(source.clone());

        let (status, json) = get_json(app.clone(), "/historical/AAPL?period=1w&period=1y").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["source"], "api");

        // 첫 값(1w) 키로 캐시됨
        let (status, json) = get_json(app, "/historical/AAPL?period=1w").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "cache");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_rejection_is_404_with_message() {
        let source = StubSource::json(
            r#"{"code": 400, "message": "**symbol** not found: NOPE", "status": "error"}"#,
        );

        let (status, json) = get_json(app(source), "/historical/NOPE").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "**symbol** not found: NOPE");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_with_generic_message() {
        let (status, json) = get_json(app(StubSource::unreachable()), "/historical/AAPL").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_malformed_upstream_body_is_500() {
        let source = StubSource::json(r#"{"values": [{"datetime": "2024-01-02"}]}"#);

        let (status, json) = get_json(app(source), "/historical/AAPL?period=1m").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], FETCH_FAILED_MESSAGE);
    }
}
