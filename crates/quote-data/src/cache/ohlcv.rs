//! 인메모리 OHLCV 캐시.
//!
//! 심볼+기간별로 정규화된 일봉 시퀀스를 보관합니다.
//!
//! # 동작 규칙
//!
//! - 키: `{symbol}_{period}` (대소문자 구분, 호출자가 보낸 그대로)
//! - 쓰기: 항상 덮어쓰기 (append 없음)
//! - 유효성: 조회 시점에 `경과 시간 < TTL` 인 항목만 반환
//! - 삭제/축출 없음: 만료 항목은 다음 갱신 때 덮어써짐
//!
//! 각 `get`/`insert` 호출은 RwLock 하나로 원자적입니다. 값은 `Arc`로
//! 공유되므로 읽는 쪽이 부분적으로 쓰인 시퀀스를 보는 일은 없습니다.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::types::OhlcvBar;

/// 기본 캐시 유효 기간 (1시간).
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// 캐시 항목.
#[derive(Debug, Clone)]
struct CacheEntry {
    bars: Arc<Vec<OhlcvBar>>,
    stored_at: Instant,
}

/// 캐시 통계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// 저장된 전체 항목 수 (만료 포함)
    pub total_entries: usize,
    /// 아직 유효한 항목 수
    pub fresh_entries: usize,
}

/// 심볼+기간별 OHLCV 캐시.
#[derive(Debug)]
pub struct OhlcvCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for OhlcvCache {
    fn default() -> Self {
        Self::new()
    }
}

impl OhlcvCache {
    /// 기본 TTL(1시간)로 생성.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: DEFAULT_TTL,
        }
    }

    /// 캐시 유효 기간 설정.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// 캐시 키 생성.
    ///
    /// 형식: `{symbol}_{period}`
    pub fn cache_key(symbol: &str, period: &str) -> String {
        format!("{}_{}", symbol, period)
    }

    /// 유효한 항목 조회. 없거나 만료되었으면 `None`.
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<OhlcvBar>>> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        let age = entry.stored_at.elapsed();
        if age < self.ttl {
            Some(entry.bars.clone())
        } else {
            debug!(key = %key, age_secs = age.as_secs(), "캐시 만료");
            None
        }
    }

    /// 항목 저장 (기존 항목 덮어쓰기).
    pub async fn insert(&self, key: String, bars: Arc<Vec<OhlcvBar>>) {
        let entry = CacheEntry {
            bars,
            stored_at: Instant::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// 캐시 통계 조회.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let fresh_entries = entries
            .values()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .count();

        CacheStats {
            total_entries: entries.len(),
            fresh_entries,
        }
    }
}
