//! 차트 데이터 타입.
//!
//! - [`OhlcvBar`]: 일봉 한 개 (프론트엔드 차트 형식)
//! - [`Period`]: 조회 기간 키워드와 일수 매핑
//! - [`HistoricalSeries`]: 게이트웨이 응답 (데이터 + 출처 + 메타)

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// OHLCV 일봉.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// 일자 (업스트림 `datetime` 그대로, 예: "2024-01-02")
    pub time: String,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량 (파싱 실패 시 0)
    pub volume: u64,
}

/// 시계열 메타 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub symbol: String,
    pub exchange: String,
    pub currency: String,
}

/// 응답 데이터 출처.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// 인메모리 캐시
    Cache,
    /// 업스트림 API 호출
    Api,
}

/// 게이트웨이 조회 결과.
#[derive(Debug, Clone)]
pub struct HistoricalSeries {
    /// 오래된 순으로 정렬된 일봉
    pub data: Arc<Vec<OhlcvBar>>,
    /// 데이터 출처
    pub source: DataSource,
    /// 업스트림 메타 (캐시 응답에는 없음)
    pub meta: Option<SeriesMeta>,
}

/// 조회 기간.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Period {
    OneWeek,
    TwoWeeks,
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl Period {
    /// 기간 키워드가 없을 때 사용하는 기본 키워드.
    pub const DEFAULT_KEYWORD: &'static str = "1m";

    /// 키워드 파싱. 알 수 없는 키워드는 `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "1w" => Some(Period::OneWeek),
            "2w" => Some(Period::TwoWeeks),
            "1m" => Some(Period::OneMonth),
            "3m" => Some(Period::ThreeMonths),
            "6m" => Some(Period::SixMonths),
            "1y" => Some(Period::OneYear),
            _ => None,
        }
    }

    /// 키워드를 기간으로 변환 (없거나 알 수 없으면 1개월).
    pub fn resolve(keyword: Option<&str>) -> Self {
        keyword
            .and_then(Self::from_keyword)
            .unwrap_or_default()
    }

    /// 조회 일수 (업스트림 `outputsize`).
    pub fn days(&self) -> u32 {
        match self {
            Period::OneWeek => 7,
            Period::TwoWeeks => 14,
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
        }
    }
}

/// 거래량 문자열 파싱.
///
/// 정수 앞부분만 사용하며 ("1234.0" → 1234), 숫자가 없으면 0.
pub fn parse_volume(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let digits: &str = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);

    digits.parse().unwrap_or(0)
}
