//! HTTP 서비스.
//!
//! - `POST /api/leads` 상담 신청을 웹훅으로 전달
//! - `POST /api/ai/{tool}` 계산 맥락과 질문을 LLM에 전달
//! - `POST /api/calculate/{tool}` 계산기 실행
//! - `GET /healthz`

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::advisor::Advisor;
use crate::config::ServerSettings;
use crate::lead::{self, WebhookRelay};

pub use types::{AiRequest, AiResponse, CalculationErrorResponse, ErrorResponse, LeadRequest};

/// 모든 핸들러가 공유하는 읽기 전용 상태.
#[derive(Debug, Clone)]
pub struct AppState {
    pub relay: WebhookRelay,
    pub advisor: Advisor,
}

impl AppState {
    pub fn new(relay: WebhookRelay, advisor: Advisor) -> Self {
        Self { relay, advisor }
    }

    /// 설정에서 공용 HTTP 클라이언트와 외부 연동 객체를 만든다.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, reqwest::Error> {
        let client = lead::http_client(settings.http_timeout)?;
        Ok(Self {
            relay: WebhookRelay::new(client.clone(), settings.webhook_url.clone()),
            advisor: Advisor::new(
                client,
                settings.openrouter_api_key.clone(),
                settings.app_url.clone(),
            ),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/leads", post(handlers::post_lead))
        .route("/api/ai/{tool}", post(handlers::post_ai))
        .route("/api/calculate/{tool}", post(handlers::post_calculate))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

/// 주소에 바인드하고 Ctrl-C까지 요청을 처리한다.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
