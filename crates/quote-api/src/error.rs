//! API 에러 응답 타입.
//!
//! 모든 엔드포인트가 같은 실패 봉투를 사용합니다.
//!
//! ```json
//! { "success": false, "error": "Gagal mengambil data saham" }
//! ```

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// 업스트림 장애 시 사용자에게 보여주는 고정 메시지.
///
/// 원본 오류는 로그에만 남깁니다.
pub const FETCH_FAILED_MESSAGE: &str = "Gagal mengambil data saham";

/// API 실패 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 항상 false
    pub success: bool,
    /// 사람이 읽을 수 있는 에러 메시지
    pub error: String,
}

impl ApiErrorResponse {
    /// 실패 응답 생성.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }

    /// 상태 코드와 함께 핸들러 에러로 변환.
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Json<ApiErrorResponse>) {
        (status, Json(self))
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;
