use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::types::{
    AiRequest, AiResponse, CalculationErrorResponse, ErrorResponse, LeadRequest, SuccessResponse,
};
use super::AppState;
use crate::lead::LeadSubmission;
use crate::tool::{self, CalcError, ToolName};

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// `POST /api/leads` → 200 `{success:true}`, 입력 오류 400, 전달 실패 500
pub async fn post_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LeadRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => return error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let lead = match LeadSubmission::new(
        req.tool.as_deref(),
        req.email.as_deref(),
        req.postcode.as_deref(),
        req.results,
        req.additional_info,
    ) {
        Ok(lead) => lead,
        Err(e) => return error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state.relay.send(&lead).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(e) => {
            warn!(error = %e, "lead not forwarded");
            error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// `POST /api/ai/{tool}` → 200 `{answer}`, 질문 누락 400, 호출 실패 500 `{answer, error}`
pub async fn post_ai(
    State(state): State<Arc<AppState>>,
    Path(tool): Path<String>,
    payload: Result<Json<AiRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => return error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let question = match req.question {
        Value::String(q) if !q.is_empty() => q,
        _ => return error(StatusCode::BAD_REQUEST, "Question is required"),
    };
    let context = match req.context {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    // 모르는 계산기는 기본 프롬프트로 처리한다.
    let tool = tool.parse::<ToolName>().ok();
    match state.advisor.ask(tool, &question, &context).await {
        Ok(answer) => Json(AiResponse {
            answer,
            error: None,
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "advisor failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AiResponse {
                    answer: e.fallback_answer().to_string(),
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

/// `POST /api/calculate/{tool}` → 200 결과, 모르는 계산기 404, 입력 오류 400
pub async fn post_calculate(
    Path(tool): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let tool = match tool.parse::<ToolName>() {
        Ok(t) => t,
        Err(e) => return error(StatusCode::NOT_FOUND, e.to_string()),
    };
    let Json(input) = match payload {
        Ok(p) => p,
        Err(rejection) => return error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match tool::run_calculation(tool, input) {
        Ok(result) => {
            info!(%tool, "calculation done");
            Json(result).into_response()
        }
        Err(CalcError::Validation(errors)) => (
            StatusCode::BAD_REQUEST,
            Json(CalculationErrorResponse {
                error: "Validatie mislukt".to_string(),
                details: errors.0,
            }),
        )
            .into_response(),
        Err(e @ CalcError::InvalidInput(_)) | Err(e @ CalcError::UnknownTool(_)) => {
            error(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e @ CalcError::Output(_)) => error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}
