//! 캐시 기반 과거 시세 게이트웨이.
//!
//! # 동작 흐름
//!
//! ```text
//! 요청 (symbol, period)
//!         │
//!         ▼
//! ┌──────────────────────┐
//! │ 1. 캐시 키 생성       │ ← "{symbol}_{period}" (대소문자 구분)
//! └──────────┬───────────┘
//!            │
//!     ┌──────┴──────┐
//!     │ 1시간 이내? │── YES ──▶ source = cache 로 반환
//!     └──────┬──────┘
//!            │ NO
//! ┌──────────▼───────────┐
//! │ 2. 업스트림 조회      │ ← outputsize = 기간 일수
//! └──────────┬───────────┘
//!            │
//!     ┌──────┴──────┐
//!     │ 오류 응답?  │── YES ──▶ NotFound (캐시 쓰지 않음)
//!     └──────┬──────┘
//!            │ NO
//! ┌──────────▼───────────┐
//! │ 3. 역순 정렬 + 변환   │
//! │ 4. 캐시 덮어쓰기      │
//! └──────────┬───────────┘
//!            ▼
//!     source = api + meta 로 반환
//! ```
//!
//! 같은 키에 대한 동시 요청은 중복 조회될 수 있으며 마지막 쓰기가 남습니다.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::cache::OhlcvCache;
use crate::error::{DataError, Result};
use crate::provider::TimeSeriesSource;
use crate::types::{DataSource, HistoricalSeries, Period};

/// 과거 시세 게이트웨이.
#[derive(Clone)]
pub struct HistoricalGateway {
    source: Arc<dyn TimeSeriesSource>,
    cache: Arc<OhlcvCache>,
}

impl HistoricalGateway {
    /// 새로운 게이트웨이 생성.
    pub fn new(source: Arc<dyn TimeSeriesSource>, cache: Arc<OhlcvCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<OhlcvCache> {
        &self.cache
    }

    /// 일봉 시계열 조회 (캐시 우선).
    ///
    /// # 인자
    /// - `symbol`: 업스트림에 그대로 전달되는 심볼 (예: "AAPL", "BBCA.JK")
    /// - `period`: 기간 키워드 (`1w`, `2w`, `1m`, `3m`, `6m`, `1y`). 없으면 `1m`,
    ///   알 수 없는 값이면 30일 조회.
    ///
    /// # 오류
    /// - [`DataError::NotFound`]: 업스트림이 요청을 거부함
    /// - [`DataError::Upstream`] / [`DataError::Parse`]: 연결 실패 또는 응답 형식 오류
    #[instrument(skip(self))]
    pub async fn get_history(&self, symbol: &str, period: Option<&str>) -> Result<HistoricalSeries> {
        let period_keyword = period.unwrap_or(Period::DEFAULT_KEYWORD);
        let cache_key = OhlcvCache::cache_key(symbol, period_keyword);

        if let Some(data) = self.cache.get(&cache_key).await {
            debug!(key = %cache_key, rows = data.len(), "캐시 적중");
            return Ok(HistoricalSeries {
                data,
                source: DataSource::Cache,
                meta: None,
            });
        }

        let outputsize = Period::resolve(Some(period_keyword)).days();
        info!(symbol = %symbol, period = %period_keyword, outputsize, "시계열 조회");

        let response = self.source.fetch_daily(symbol, outputsize).await?;

        if response.is_error() {
            let message = response
                .message
                .clone()
                .unwrap_or_else(|| format!("Symbol {} not found", symbol));
            warn!(symbol = %symbol, message = %message, "업스트림 오류 응답");
            return Err(DataError::NotFound(message));
        }

        let data = Arc::new(response.bars_oldest_first()?);
        let meta = response.meta_or_default(symbol);

        self.cache.insert(cache_key, data.clone()).await;
        debug!(symbol = %symbol, rows = data.len(), "캐시 저장");

        Ok(HistoricalSeries {
            data,
            source: DataSource::Api,
            meta: Some(meta),
        })
    }
}
