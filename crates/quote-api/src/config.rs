//! 서버 설정.
//!
//! 기본값 위에 환경 변수를 덮어써서 로드합니다. `.env` 파일은 `main`에서
//! 먼저 읽어 프로세스 환경에 반영됩니다.
//!
//! # 환경변수
//!
//! - `HOST`: 바인딩 주소 (기본값: `0.0.0.0`)
//! - `PORT`: 포트 (기본값: `3001`)
//! - `TWELVE_DATA_API_KEY`: Twelve Data API 키 (기본값: `demo`)
//! - `TWELVE_DATA_BASE_URL`: API 주소 (기본값: `https://api.twelvedata.com`)
//! - `UPSTREAM_TIMEOUT_SECS`: 업스트림 요청 타임아웃 (기본값: `15`, 1 이상이며
//!   전역 요청 타임아웃보다 짧아야 함)

use std::net::SocketAddr;
use std::time::Duration;

use quote_data::provider::{DEFAULT_BASE_URL, DEMO_API_KEY};
use quote_data::UpstreamConfig;
use serde::Deserialize;

use crate::app::REQUEST_TIMEOUT;

/// 서버 설정 구조체.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트 주소
    pub host: String,
    /// 바인딩할 포트
    pub port: u16,
    /// Twelve Data API 키
    pub twelve_data_api_key: String,
    /// Twelve Data API 주소
    pub twelve_data_base_url: String,
    /// 업스트림 요청 타임아웃 (초)
    pub upstream_timeout_secs: u64,
}

impl ServerConfig {
    /// 프로세스 환경 변수에서 설정 로드.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::default().try_parsing(true))
    }

    /// 기본값 + 주어진 소스로 설정 로드.
    pub fn load<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .set_default("twelve_data_api_key", DEMO_API_KEY)?
            .set_default("twelve_data_base_url", DEFAULT_BASE_URL)?
            .set_default("upstream_timeout_secs", 15)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// 설정 값 검증.
    ///
    /// 업스트림 타임아웃은 1초 이상, 전역 요청 타임아웃 미만이어야 합니다.
    fn validate(&self) -> Result<(), config::ConfigError> {
        let timeout = Duration::from_secs(self.upstream_timeout_secs);
        if timeout.is_zero() || timeout >= REQUEST_TIMEOUT {
            return Err(config::ConfigError::Message(format!(
                "UPSTREAM_TIMEOUT_SECS must be between 1 and {} (got {})",
                REQUEST_TIMEOUT.as_secs() - 1,
                self.upstream_timeout_secs
            )));
        }
        Ok(())
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// 업스트림 클라이언트 설정.
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.twelve_data_base_url.clone(),
            api_key: self.twelve_data_api_key.clone(),
            timeout: Duration::from_secs(self.upstream_timeout_secs),
        }
    }
}
