//! 캐싱 레이어.
//!
//! - OHLCV 캐시: 심볼+기간별 일봉 시퀀스 (TTL 1시간, 인메모리)

pub mod ohlcv;

pub use ohlcv::{CacheStats, OhlcvCache, DEFAULT_TTL};
