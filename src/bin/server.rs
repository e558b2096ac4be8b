//! 상담 신청 / AI 상담 / 계산 HTTP 서비스.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use energy_savings_toolbox::api::{self, AppState};
use energy_savings_toolbox::config::ServerSettings;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match ServerSettings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    if settings.openrouter_api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set, AI advice disabled");
    }
    if settings.webhook_url.is_none() {
        warn!("N8N_WEBHOOK_URL not set, lead forwarding disabled");
    }

    let state = match AppState::from_settings(&settings) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    match api::serve(state, settings.bind_addr).await {
        Ok(()) => {
            info!("server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, addr = %settings.bind_addr, "server error");
            ExitCode::FAILURE
        }
    }
}
