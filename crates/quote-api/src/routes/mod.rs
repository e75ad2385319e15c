//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/api/health` - 헬스 체크
//! - `/api/historical/{symbol}` - 과거 일봉 시세 (캐시 1시간)
//! - `/api/search` - 종목 검색

pub mod health;
pub mod historical;
pub mod search;

pub use health::{health_router, HealthResponse};
pub use historical::{historical_router, HistoricalQuery, HistoricalResponse};
pub use search::{search_router, SearchQuery, SearchResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 `/api` 아래에 조합합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    let api = Router::new()
        .merge(health_router())
        .merge(historical_router())
        .merge(search_router());

    Router::new().nest("/api", api)
}

/// 쿼리 파라미터의 첫 번째 값.
///
/// 같은 키가 반복되면 (`?q=ba&q=jk`) 첫 값만 사용합니다.
pub(crate) fn first_param(params: &[(String, String)], key: &str) -> Option<String> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_param_ignores_repeats() {
        let params = vec![
            ("q".to_string(), "ba".to_string()),
            ("other".to_string(), "x".to_string()),
            ("q".to_string(), "jk".to_string()),
        ];

        assert_eq!(first_param(&params, "q").as_deref(), Some("ba"));
        assert_eq!(first_param(&params, "period"), None);
    }
}
