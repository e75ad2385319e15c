//! 주식 차트용 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 과거 일봉 시세 프록시 (Twelve Data, 인메모리 캐시 1시간)
//! - 고정 종목 목록 검색
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`config`]: 서버 설정 (환경 변수)
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`app`]: 미들웨어를 포함한 전체 라우터

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use app::create_router;
pub use config::ServerConfig;
pub use error::{ApiErrorResponse, ApiResult};
pub use routes::*;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, StubSource};
