//! Twelve Data API 클라이언트.
//!
//! `time_series` 엔드포인트에서 일봉 데이터를 조회합니다.
//!
//! # 응답 형식
//!
//! 성공:
//! ```json
//! {
//!   "meta": { "symbol": "AAPL", "exchange": "NASDAQ", "currency": "USD" },
//!   "values": [
//!     { "datetime": "2024-01-03", "open": "184.2", "high": "185.8",
//!       "low": "183.4", "close": "184.2", "volume": "58414500" }
//!   ],
//!   "status": "ok"
//! }
//! ```
//!
//! 실패 (HTTP 200으로 내려옴):
//! ```json
//! { "code": 400, "message": "**symbol** not found: XYZ", "status": "error" }
//! ```
//!
//! `values`는 최신 순으로 내려옵니다.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::TimeSeriesSource;
use crate::error::{DataError, Result};
use crate::types::{parse_volume, OhlcvBar, SeriesMeta};

/// 기본 API 주소.
pub const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";

/// API 키 미설정 시 사용하는 공개 데모 키.
pub const DEMO_API_KEY: &str = "demo";

/// 일봉 interval 값.
const DAILY_INTERVAL: &str = "1day";

/// 업스트림 설정.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API 주소 (테스트 시 mock 서버 주소)
    pub base_url: String,
    /// API 키
    pub api_key: String,
    /// 요청 타임아웃
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEMO_API_KEY.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl UpstreamConfig {
    /// 데모 키 사용 여부.
    pub fn is_demo_key(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }
}

/// `time_series` 응답.
///
/// 성공/실패 응답을 하나의 구조로 받습니다. 필드 타입이 맞지 않으면
/// 역직렬화 단계에서 [`DataError::Parse`]가 됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSeriesResponse {
    /// "ok" | "error"
    #[serde(default)]
    pub status: Option<String>,
    /// 오류 메시지 (status == "error")
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub meta: Option<RawMeta>,
    /// 최신 순 일봉
    #[serde(default)]
    pub values: Option<Vec<RawBar>>,
}

/// 응답 메타 블록.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// 원본 일봉 (모든 값이 문자열).
#[derive(Debug, Clone, Deserialize)]
pub struct RawBar {
    pub datetime: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    /// FX 등 일부 종목은 거래량이 없음
    #[serde(default)]
    pub volume: Option<String>,
}

impl TimeSeriesResponse {
    /// 업스트림 오류 응답 여부.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    /// 오래된 순으로 정렬된 일봉으로 변환.
    ///
    /// `values`가 없으면 빈 시퀀스입니다.
    pub fn bars_oldest_first(&self) -> Result<Vec<OhlcvBar>> {
        let Some(values) = &self.values else {
            return Ok(Vec::new());
        };

        values.iter().rev().map(RawBar::to_bar).collect()
    }

    /// 메타 정보 (누락 필드는 요청 심볼 / "Unknown" / "USD").
    pub fn meta_or_default(&self, requested_symbol: &str) -> SeriesMeta {
        let meta = self.meta.clone().unwrap_or_default();
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        SeriesMeta {
            symbol: non_empty(meta.symbol).unwrap_or_else(|| requested_symbol.to_string()),
            exchange: non_empty(meta.exchange).unwrap_or_else(|| "Unknown".to_string()),
            currency: non_empty(meta.currency).unwrap_or_else(|| "USD".to_string()),
        }
    }
}

impl RawBar {
    /// 차트용 일봉으로 변환. 가격이 숫자가 아니면 파싱 오류.
    pub fn to_bar(&self) -> Result<OhlcvBar> {
        Ok(OhlcvBar {
            time: self.datetime.clone(),
            open: parse_price("open", &self.open)?,
            high: parse_price("high", &self.high)?,
            low: parse_price("low", &self.low)?,
            close: parse_price("close", &self.close)?,
            volume: self.volume.as_deref().map(parse_volume).unwrap_or(0),
        })
    }
}

fn parse_price(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::Parse(format!("invalid {} value: {:?}", field, raw)))
}

/// Twelve Data API 클라이언트.
#[derive(Clone)]
pub struct TwelveDataClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl TwelveDataClient {
    /// 새로운 클라이언트 생성.
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Upstream(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/time_series", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TimeSeriesSource for TwelveDataClient {
    async fn fetch_daily(&self, symbol: &str, outputsize: u32) -> Result<TimeSeriesResponse> {
        let url = self.endpoint();
        let outputsize = outputsize.to_string();

        info!(symbol = %symbol, outputsize = %outputsize, "Twelve Data 시계열 요청");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", DAILY_INTERVAL),
                ("outputsize", outputsize.as_str()),
                ("apikey", self.config.api_key.as_str()),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Upstream(format!(
                "Twelve Data HTTP {} for {}",
                status, symbol
            )));
        }

        let body = response.text().await?;
        let parsed: TimeSeriesResponse = serde_json::from_str(&body)?;

        debug!(
            symbol = %symbol,
            status = ?parsed.status,
            rows = parsed.values.as_ref().map_or(0, Vec::len),
            "Twelve Data 응답 수신"
        );

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn raw(datetime: &str, close: &str, volume: Option<&str>) -> RawBar {
        RawBar {
            datetime: datetime.to_string(),
            open: close.to_string(),
            high: close.to_string(),
            low: close.to_string(),
            close: close.to_string(),
            volume: volume.map(str::to_string),
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> TwelveDataClient {
        TwelveDataClient::new(UpstreamConfig {
            base_url: server.url(),
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_bars_are_reversed_to_oldest_first() {
        let response = TimeSeriesResponse {
            values: Some(vec![
                raw("2024-01-04", "3.0", Some("30")),
                raw("2024-01-03", "2.0", Some("20")),
                raw("2024-01-02", "1.0", Some("10")),
            ]),
            ..Default::default()
        };

        let bars = response.bars_oldest_first().unwrap();
        let times: Vec<&str> = bars.iter().map(|b| b.time.as_str()).collect();
        assert_eq!(times, vec!["2024-01-02", "2024-01-03", "2024-01-04"]);
        assert_eq!(bars[0].close, 1.0);
        assert_eq!(bars[2].volume, 30);
    }

    #[test]
    fn test_missing_values_is_empty() {
        let response = TimeSeriesResponse::default();
        assert!(response.bars_oldest_first().unwrap().is_empty());
    }

    #[test]
    fn test_bad_volume_defaults_to_zero() {
        let bar = raw("2024-01-02", "10.5", Some("abc")).to_bar().unwrap();
        assert_eq!(bar.volume, 0);

        let bar = raw("2024-01-02", "10.5", None).to_bar().unwrap();
        assert_eq!(bar.volume, 0);
    }

    #[test]
    fn test_bad_price_is_parse_error() {
        let err = raw("2024-01-02", "not-a-number", Some("1")).to_bar().unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_meta_defaults() {
        let response = TimeSeriesResponse::default();
        let meta = response.meta_or_default("BBCA.JK");
        assert_eq!(meta.symbol, "BBCA.JK");
        assert_eq!(meta.exchange, "Unknown");
        assert_eq!(meta.currency, "USD");

        let response = TimeSeriesResponse {
            meta: Some(RawMeta {
                symbol: Some("AAPL".into()),
                exchange: Some("NASDAQ".into()),
                currency: Some(String::new()),
            }),
            ..Default::default()
        };
        let meta = response.meta_or_default("aapl");
        assert_eq!(meta.symbol, "AAPL");
        assert_eq!(meta.exchange, "NASDAQ");
        assert_eq!(meta.currency, "USD");
    }

    #[tokio::test]
    async fn test_fetch_daily_sends_expected_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/time_series")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "AAPL".into()),
                Matcher::UrlEncoded("interval".into(), "1day".into()),
                Matcher::UrlEncoded("outputsize".into(), "7".into()),
                Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "meta": {"symbol": "AAPL", "exchange": "NASDAQ", "currency": "USD"},
                    "values": [
                        {"datetime": "2024-01-03", "open": "184.22", "high": "185.88",
                         "low": "183.43", "close": "184.25", "volume": "58414500"},
                        {"datetime": "2024-01-02", "open": "187.15", "high": "188.44",
                         "low": "183.89", "close": "185.64", "volume": "82488700"}
                    ],
                    "status": "ok"
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let response = client.fetch_daily("AAPL", 7).await.unwrap();
        mock.assert_async().await;

        assert!(!response.is_error());
        let bars = response.bars_oldest_first().unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].time, "2024-01-02");
        assert_eq!(bars[0].volume, 82_488_700);
    }

    #[tokio::test]
    async fn test_fetch_daily_returns_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/time_series")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"code": 400, "message": "**symbol** not found: XYZ", "status": "error"}"#)
            .create_async()
            .await;

        let response = client_for(&server).fetch_daily("XYZ", 30).await.unwrap();
        assert!(response.is_error());
        assert_eq!(response.message.as_deref(), Some("**symbol** not found: XYZ"));
    }

    #[tokio::test]
    async fn test_fetch_daily_http_failure_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/time_series")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).fetch_daily("AAPL", 30).await.unwrap_err();
        assert!(matches!(err, DataError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_fetch_daily_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/time_series")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"values": "not-a-list"}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_daily("AAPL", 30).await.unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }
}
