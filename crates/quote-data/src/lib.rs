//! 차트 데이터 관리.
//!
//! 이 crate는 다음을 제공합니다:
//! - Twelve Data 일봉 조회 클라이언트
//! - 심볼+기간별 인메모리 OHLCV 캐시 (TTL 1시간)
//! - 캐시 우선 과거 시세 게이트웨이
//! - 고정 종목 디렉터리 검색

pub mod cache;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod types;

pub use cache::{CacheStats, OhlcvCache, DEFAULT_TTL};
pub use error::{DataError, Result};
pub use gateway::HistoricalGateway;
pub use provider::{
    StaticSymbolDirectory, SymbolDirectory, SymbolEntry, TimeSeriesResponse, TimeSeriesSource,
    TwelveDataClient, UpstreamConfig,
};
pub use types::{DataSource, HistoricalSeries, OhlcvBar, Period, SeriesMeta};
