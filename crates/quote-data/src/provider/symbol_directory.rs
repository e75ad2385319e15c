//! 심볼 디렉터리.
//!
//! 검색 화면에서 사용하는 고정 종목 목록(미국 + IDX)을 제공합니다.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// 검색 최소 글자 수.
pub const MIN_QUERY_CHARS: usize = 2;

/// 종목 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// 티커 (IDX 종목은 ".JK" 접미사)
    pub symbol: String,
    /// 회사명
    pub name: String,
    /// 거래소 (NASDAQ, IDX)
    pub exchange: String,
}

impl SymbolEntry {
    pub fn new(symbol: &str, name: &str, exchange: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            exchange: exchange.to_string(),
        }
    }

    /// 소문자로 변환된 검색어가 티커나 회사명에 포함되는지 확인.
    fn matches(&self, folded_query: &str) -> bool {
        self.symbol.to_lowercase().contains(folded_query)
            || self.name.to_lowercase().contains(folded_query)
    }
}

/// 심볼 디렉터리 trait.
pub trait SymbolDirectory: Send + Sync {
    /// 심볼 검색.
    ///
    /// 검색어가 없거나 2글자 미만이면 빈 결과를 반환합니다.
    fn search(&self, query: Option<&str>) -> Result<Vec<SymbolEntry>>;
}

/// 고정 목록 기반 디렉터리.
///
/// 선언 순서대로 결과를 반환하며 점수/정렬은 하지 않습니다.
#[derive(Debug, Clone)]
pub struct StaticSymbolDirectory {
    entries: Vec<SymbolEntry>,
}

impl Default for StaticSymbolDirectory {
    fn default() -> Self {
        Self::new(reference_symbols())
    }
}

impl StaticSymbolDirectory {
    pub fn new(entries: Vec<SymbolEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SymbolDirectory for StaticSymbolDirectory {
    fn search(&self, query: Option<&str>) -> Result<Vec<SymbolEntry>> {
        let Some(query) = query.filter(|q| q.chars().count() >= MIN_QUERY_CHARS) else {
            return Ok(Vec::new());
        };

        let folded = query.to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.matches(&folded))
            .cloned()
            .collect())
    }
}

/// 기본 종목 목록.
pub fn reference_symbols() -> Vec<SymbolEntry> {
    vec![
        SymbolEntry::new("AAPL", "Apple Inc.", "NASDAQ"),
        SymbolEntry::new("MSFT", "Microsoft Corp.", "NASDAQ"),
        SymbolEntry::new("GOOGL", "Alphabet Inc.", "NASDAQ"),
        SymbolEntry::new("AMZN", "Amazon.com Inc.", "NASDAQ"),
        SymbolEntry::new("TSLA", "Tesla Inc.", "NASDAQ"),
        SymbolEntry::new("META", "Meta Platforms Inc.", "NASDAQ"),
        SymbolEntry::new("BBCA.JK", "Bank Central Asia Tbk", "IDX"),
        SymbolEntry::new("BBRI.JK", "Bank Rakyat Indonesia Tbk", "IDX"),
        SymbolEntry::new("TLKM.JK", "Telkom Indonesia Tbk", "IDX"),
        SymbolEntry::new("ASII.JK", "Astra International Tbk", "IDX"),
    ]
}
