//! 상담 신청(lead) 검증과 웹훅 전달.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

/// 웹훅 페이로드의 출처 표시.
pub const LEAD_SOURCE: &str = "energie-besparing-tools";

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("Tool, email en postcode zijn verplicht")]
    MissingFields,
    #[error("Ongeldig e-mailadres")]
    InvalidEmail,
    #[error("Ongeldige postcode (gebruik formaat: 1234AB)")]
    InvalidPostcode,
    #[error("N8N webhook URL not configured")]
    NotConfigured,
    #[error("N8N webhook returned {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl LeadError {
    /// 사용자 입력 문제인지 (400) 서버 측 문제인지 (500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LeadError::MissingFields | LeadError::InvalidEmail | LeadError::InvalidPostcode
        )
    }
}

/// `^[^\s@]+@[^\s@]+\.[^\s@]+$` 와 같은 규칙.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // 도메인 안에 앞뒤가 비어 있지 않은 점이 하나라도 있어야 한다.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// 네덜란드 우편번호 (1234AB). 공백은 무시하고 대소문자는 구분하지 않는다.
pub fn is_valid_postcode(postcode: &str) -> bool {
    let compact: Vec<char> = postcode.chars().filter(|c| !c.is_whitespace()).collect();
    match compact.as_slice() {
        [first, d2, d3, d4, l1, l2] => {
            matches!(first, '1'..='9')
                && [d2, d3, d4].iter().all(|c| c.is_ascii_digit())
                && l1.is_ascii_alphabetic()
                && l2.is_ascii_alphabetic()
        }
        _ => false,
    }
}

/// 검증과 정규화를 마친 상담 신청.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub tool: String,
    pub email: String,
    pub postcode: String,
    pub results: Value,
    pub additional_info: Value,
}

impl LeadSubmission {
    /// 폼 값을 검사한다. 빈 문자열은 누락으로 본다.
    pub fn new(
        tool: Option<&str>,
        email: Option<&str>,
        postcode: Option<&str>,
        results: Value,
        additional_info: Value,
    ) -> Result<Self, LeadError> {
        let (Some(tool), Some(email), Some(postcode)) = (
            tool.filter(|s| !s.is_empty()),
            email.filter(|s| !s.is_empty()),
            postcode.filter(|s| !s.is_empty()),
        ) else {
            return Err(LeadError::MissingFields);
        };
        if !is_valid_email(email) {
            return Err(LeadError::InvalidEmail);
        }
        if !is_valid_postcode(postcode) {
            return Err(LeadError::InvalidPostcode);
        }

        Ok(Self {
            tool: tool.to_string(),
            email: email.trim().to_string(),
            postcode: postcode.trim().to_uppercase(),
            results,
            additional_info,
        })
    }
}

/// 웹훅으로 보내는 본문.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    #[serde(flatten)]
    lead: &'a LeadSubmission,
    timestamp: String,
    source: &'static str,
}

/// 상담 신청을 외부 자동화 웹훅으로 넘긴다. 재시도는 하지 않는다.
#[derive(Debug, Clone)]
pub struct WebhookRelay {
    client: Client,
    url: Option<Url>,
}

impl WebhookRelay {
    pub fn new(client: Client, url: Option<Url>) -> Self {
        Self { client, url }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    pub async fn send(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        let Some(url) = &self.url else {
            error!("N8N_WEBHOOK_URL not configured");
            return Err(LeadError::NotConfigured);
        };

        let payload = WebhookPayload {
            lead,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            source: LEAD_SOURCE,
        };
        let response = self
            .client
            .post(url.clone())
            .json(&payload)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "lead webhook transport error"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "lead webhook rejected");
            return Err(LeadError::Status(status.as_u16()));
        }

        info!(tool = %lead.tool, "lead forwarded");
        Ok(())
    }
}

/// 웹훅/LLM 호출에 함께 쓰는 HTTP 클라이언트.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}
