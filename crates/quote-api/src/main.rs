//! 주식 차트 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 과거 시세 조회, 종목 검색, 헬스 체크 엔드포인트를 제공합니다.

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use quote_api::app::create_router;
use quote_api::config::ServerConfig;
use quote_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // tracing 초기화
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quote_api=info,quote_data=info,tower_http=debug".into()),
        )
        .init();

    info!("Starting Quote API server...");

    // 설정 로드
    let config = ServerConfig::from_env().context("서버 설정 로드 실패")?;
    let addr = config.socket_addr().map_err(|e| {
        error!(
            host = %config.host,
            port = config.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. HOST, PORT 환경변수를 확인하세요."
        );
        e
    })?;

    if config.upstream().is_demo_key() {
        warn!("TWELVE_DATA_API_KEY not set, using public demo key (limited symbols)");
    }

    let state = Arc::new(AppState::from_config(&config).context("업스트림 클라이언트 생성 실패")?);
    info!(
        version = %state.version,
        upstream = %config.twelve_data_base_url,
        timeout_secs = config.upstream_timeout_secs,
        "Application state initialized"
    );

    // 라우터 생성
    let app = create_router(state);

    // 서버 시작
    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("{} 바인딩 실패", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
