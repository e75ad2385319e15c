//! 종목 검색 endpoint.
//!
//! - `GET /api/search?q=bank` - 티커/회사명 부분 일치 검색 (대소문자 무시)

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use quote_data::SymbolEntry;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::first_param;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 검색 쿼리.
#[derive(Debug, Default)]
pub struct SearchQuery {
    /// 검색어 (2글자 미만이면 빈 결과)
    pub q: Option<String>,
}

impl From<Vec<(String, String)>> for SearchQuery {
    fn from(params: Vec<(String, String)>) -> Self {
        Self {
            q: first_param(&params, "q"),
        }
    }
}

/// 검색 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<SymbolEntry>,
}

/// 종목 검색.
///
/// GET /api/search
///
/// 디렉터리 오류는 원본 메시지를 그대로 돌려줍니다.
pub async fn search_symbols(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<SearchResponse>> {
    let query = SearchQuery::from(params);
    let data = state.directory.search(query.q.as_deref()).map_err(|e| {
        error!(query = ?query.q, error = %e, "종목 검색 실패");
        ApiErrorResponse::new(e.detail()).with_status(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    debug!(query = ?query.q, matches = data.len(), "종목 검색");

    Ok(Json(SearchResponse {
        success: true,
        data,
    }))
}

/// 검색 라우터 생성.
pub fn search_router() -> Router<Arc<AppState>> {
    Router::new().route("/search", get(search_symbols))
}
