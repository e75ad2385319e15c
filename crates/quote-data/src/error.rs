//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 외부 소스가 요청을 거부함 (잘못된 심볼 등)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 외부 소스 연결/타임아웃/HTTP 상태 오류
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// 외부 응답 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 심볼 디렉터리 조회 오류
    #[error("Directory error: {0}")]
    Directory(String),
}

impl DataError {
    /// 외부 소스 장애 여부 (호출자에게 원문을 노출하지 않는 오류).
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, DataError::Upstream(_) | DataError::Parse(_))
    }

    /// 접두어 없는 원본 메시지.
    pub fn detail(&self) -> &str {
        match self {
            DataError::NotFound(msg)
            | DataError::Upstream(msg)
            | DataError::Parse(msg)
            | DataError::Directory(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::Parse(err.to_string())
        } else {
            DataError::Upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
