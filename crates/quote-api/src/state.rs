//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 공유됩니다. 시세 캐시는
//! 게이트웨이가 소유하며 요청 간에 같은 인스턴스를 사용합니다.

use std::sync::Arc;

#[cfg(any(test, feature = "test-utils"))]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(any(test, feature = "test-utils"))]
use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use quote_data::{DataError, TimeSeriesResponse};
use quote_data::{
    HistoricalGateway, OhlcvCache, Result, StaticSymbolDirectory, SymbolDirectory,
    TimeSeriesSource, TwelveDataClient,
};

use crate::config::ServerConfig;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 과거 시세 게이트웨이 (캐시 + 업스트림)
    pub gateway: HistoricalGateway,

    /// 종목 검색 디렉터리
    pub directory: Arc<dyn SymbolDirectory>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `source` - 일봉 시계열 소스
    /// * `directory` - 종목 검색 디렉터리
    pub fn new(source: Arc<dyn TimeSeriesSource>, directory: Arc<dyn SymbolDirectory>) -> Self {
        Self {
            gateway: HistoricalGateway::new(source, Arc::new(OhlcvCache::new())),
            directory,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 설정으로부터 Twelve Data 클라이언트와 기본 디렉터리를 사용하는 상태 생성.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let client = TwelveDataClient::new(config.upstream())?;
        Ok(Self::new(
            Arc::new(client),
            Arc::new(StaticSymbolDirectory::default()),
        ))
    }

    /// 게이트웨이 교체 (캐시 TTL 등을 바꾼 게이트웨이 주입용).
    pub fn with_gateway(mut self, gateway: HistoricalGateway) -> Self {
        self.gateway = gateway;
        self
    }
}

/// 테스트용 AppState 생성.
///
/// 기본 종목 디렉터리와 주어진 시계열 소스를 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state(source: Arc<dyn TimeSeriesSource>) -> AppState {
    AppState::new(source, Arc::new(StaticSymbolDirectory::default()))
}

/// 테스트용 고정 응답 소스.
///
/// JSON 본문을 [`TimeSeriesResponse`]로 파싱해 돌려주며 호출 횟수를 기록합니다.
/// 본문이 없으면 연결 실패를 흉내냅니다.
#[cfg(any(test, feature = "test-utils"))]
pub struct StubSource {
    body: Option<String>,
    calls: AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl StubSource {
    pub fn json(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: Some(body.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            body: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl TimeSeriesSource for StubSource {
    async fn fetch_daily(&self, _symbol: &str, _outputsize: u32) -> Result<TimeSeriesResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.body {
            Some(body) => Ok(serde_json::from_str(body)?),
            None => Err(DataError::Upstream("connection refused".to_string())),
        }
    }
}
