//! HTTP 애플리케이션 조립.
//!
//! API 라우터에 공통 미들웨어(CORS, 트레이싱, 전역 타임아웃)를 씌웁니다.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::routes::create_api_router;
use crate::state::AppState;

/// 전역 요청 타임아웃.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// CORS 미들웨어 구성.
///
/// 차트 프론트엔드가 어느 origin에서든 호출할 수 있도록 모두 허용합니다.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 전체 라우터 생성.
pub fn create_router(state: Arc<AppState>) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer())
}
