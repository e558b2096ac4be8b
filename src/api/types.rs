//! 요청/응답 본문.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::ValidationError;

/// `POST /api/leads` 본문.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub results: Value,
    #[serde(default)]
    pub additional_info: Value,
}

/// `POST /api/ai/{tool}` 본문. 형식 검사는 핸들러에서 한다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiRequest {
    #[serde(default)]
    pub question: Value,
    #[serde(default)]
    pub context: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// 계산 실패. 검증 오류면 항목별 상세를 함께 돌려준다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationError>,
}
