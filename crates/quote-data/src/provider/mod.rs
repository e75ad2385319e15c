//! 외부 데이터 Provider.
//!
//! - [`twelve_data`]: Twelve Data `time_series` 클라이언트
//! - [`symbol_directory`]: 고정 종목 디렉터리 검색

pub mod symbol_directory;
pub mod twelve_data;

use async_trait::async_trait;

use crate::error::Result;

pub use symbol_directory::{
    reference_symbols, StaticSymbolDirectory, SymbolDirectory, SymbolEntry, MIN_QUERY_CHARS,
};
pub use twelve_data::{
    RawBar, RawMeta, TimeSeriesResponse, TwelveDataClient, UpstreamConfig, DEFAULT_BASE_URL,
    DEMO_API_KEY,
};

/// 일봉 시계열 소스 trait.
///
/// 게이트웨이는 이 trait에만 의존하므로 테스트에서는 인메모리 구현을 주입합니다.
#[async_trait]
pub trait TimeSeriesSource: Send + Sync {
    /// 최근 `outputsize` 일의 일봉 조회 (응답은 최신 순).
    ///
    /// 업스트림이 오류 봉투(`status: "error"`)를 돌려준 경우에도 `Ok`이며,
    /// 연결/타임아웃/HTTP 상태/형식 오류만 `Err`입니다.
    async fn fetch_daily(&self, symbol: &str, outputsize: u32) -> Result<TimeSeriesResponse>;
}
