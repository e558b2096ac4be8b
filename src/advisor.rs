//! 계산 결과를 근거로 LLM에게 질문을 넘기는 AI 상담.

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::tool::ToolName;

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const MODEL: &str = "openai/gpt-4o-mini";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 500;
pub const APP_TITLE: &str = "Energie Besparing Tools";

/// 알 수 없는 계산기에 쓰는 기본 프롬프트.
pub const GENERIC_PROMPT: &str =
    "Je bent een energieadviseur. Antwoord altijd in het Nederlands.";
pub const NO_ANSWER: &str = "Geen antwoord ontvangen.";

const PROMPT_TAIL: &str =
    "Gebruik de berekende resultaten om je advies te onderbouwen. Antwoord altijd in het Nederlands.";

/// 계산기별 전문 분야와 다룰 주제.
fn expertise(tool: ToolName) -> (&'static str, &'static str) {
    match tool {
        ToolName::SolarPanels => (
            "zonnepanelen",
            "zonnepanelen opbrengst, saldering, batterij-optie en plaatsing",
        ),
        ToolName::HeatPump => (
            "warmtepompen",
            "hybride vs all-electric warmtepompen, isolatie-vereisten, COP-waarden en dimensionering",
        ),
        ToolName::AirConditioning => (
            "airconditioning",
            "koelvermogen, energieverbruik, plaatsing en energiezuinig koelen",
        ),
        ToolName::HomeBattery => (
            "thuisbatterijen",
            "batterijcapaciteit, zelfconsumptie, saldering afbouw en dynamisch laden",
        ),
        ToolName::Insulation => (
            "isolatie",
            "isolatiemaatregelen, prioriteiten, subsidies en terugverdientijd",
        ),
        ToolName::BoilerReplacement => (
            "CV-ketels",
            "ketelvervanging, vermogen, tapwater capaciteit en hybride opties",
        ),
        ToolName::EvCharger => (
            "EV-laadpalen",
            "laadvermogen, aansluiting, laadtijden en slim laden",
        ),
        ToolName::EnergyContract => (
            "energiecontracten",
            "vast vs variabel, marktverwachtingen en overstappen",
        ),
        ToolName::WindowFrames => (
            "kozijnen en glas",
            "HR++ vs triple glas, warmteverlies, comfort en terugverdientijd",
        ),
        ToolName::EnergyLabel => (
            "energielabels",
            "EPG-waarden, labelklassen en maatregelen om het label te verbeteren",
        ),
        ToolName::HotWaterBoiler => (
            "boilers",
            "boiler types, dimensionering, warmtepompboilers en kosten",
        ),
    }
}

/// 계산기 전용 시스템 프롬프트. 계산기를 모르면 기본 프롬프트.
pub fn system_prompt(tool: Option<ToolName>) -> String {
    let Some(tool) = tool else {
        return GENERIC_PROMPT.to_string();
    };
    let (field, topics) = expertise(tool);
    let advice = if tool == ToolName::SolarPanels {
        format!("Geef praktisch, accuraat advies over {topics}.")
    } else {
        format!("Geef advies over {topics}.")
    };
    format!("Je bent een expert energieadviseur gespecialiseerd in {field}. \n{advice}\n{PROMPT_TAIL}")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(render_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// 계산 맥락을 `key: value` 줄로. 키는 요청에 온 순서대로.
pub fn format_context(context: &Map<String, Value>) -> String {
    context
        .iter()
        .map(|(k, v)| format!("{k}: {}", render_value(v)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_message(context: &Map<String, Value>, question: &str) -> String {
    format!(
        "Context van de berekening:\n{}\n\nVraag van de gebruiker: {question}",
        format_context(context)
    )
}

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Missing API key")]
    MissingApiKey,
    #[error("API error: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl AdvisorError {
    /// 사용자에게 보여 줄 대체 답변.
    pub fn fallback_answer(&self) -> &'static str {
        match self {
            AdvisorError::MissingApiKey => {
                "AI-functie is momenteel niet beschikbaar. Voeg OPENROUTER_API_KEY toe aan environment variables."
            }
            AdvisorError::Status(_) => {
                "Sorry, er ging iets mis bij het ophalen van het AI-antwoord. Probeer het later opnieuw."
            }
            AdvisorError::Transport(_) => "Sorry, er ging iets mis. Probeer het later opnieuw.",
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'static str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_answer(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_ANSWER.to_string())
    }
}

/// OpenRouter chat completions 클라이언트.
#[derive(Clone)]
pub struct Advisor {
    client: Client,
    api_key: Option<String>,
    referer: String,
}

impl fmt::Debug for Advisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Advisor")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("referer", &self.referer)
            .finish()
    }
}

impl Advisor {
    pub fn new(client: Client, api_key: Option<String>, referer: String) -> Self {
        Self {
            client,
            api_key,
            referer,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn ask(
        &self,
        tool: Option<ToolName>,
        question: &str,
        context: &Map<String, Value>,
    ) -> Result<String, AdvisorError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::MissingApiKey)?;

        let system = system_prompt(tool);
        let user = user_message(context, question);
        let body = ChatRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(tool = ?tool, "asking advisor");
        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "error calling OpenRouter"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %text, "OpenRouter API error");
            return Err(AdvisorError::Status(status.as_u16()));
        }

        let data: ChatResponse = response.json().await?;
        Ok(data.into_answer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_tool_has_a_dutch_prompt() {
        for tool in ToolName::ALL {
            let prompt = system_prompt(Some(tool));
            assert!(prompt.starts_with("Je bent een expert energieadviseur"));
            assert!(prompt.ends_with("Antwoord altijd in het Nederlands."));
        }
        assert_eq!(system_prompt(None), GENERIC_PROMPT);
        assert!(system_prompt(Some(ToolName::HeatPump))
            .starts_with("Je bent een expert energieadviseur gespecialiseerd in warmtepompen. \nGeef advies over"));
    }

    #[test]
    fn context_lines_render_like_plain_values() {
        let context = json!({
            "gasVerbruik": 1500.0,
            "woningType": "tussenwoning",
            "saldering": true,
            "maatregelen": ["dak", "vloer"],
        });
        let text = format_context(context.as_object().unwrap());
        assert!(text.contains("gasVerbruik: 1500"));
        assert!(!text.contains("1500.0"));
        assert!(text.contains("woningType: tussenwoning"));
        assert!(text.contains("saldering: true"));
        assert!(text.contains("maatregelen: dak,vloer"));
    }

    #[test]
    fn context_keeps_request_key_order() {
        let context: Map<String, Value> =
            serde_json::from_str(r#"{"woningType":"hoekwoning","gasVerbruik":1200,"besparing":310.5}"#).unwrap();
        assert_eq!(
            format_context(&context),
            "woningType: hoekwoning\ngasVerbruik: 1200\nbesparing: 310.5"
        );
    }

    #[test]
    fn user_message_layout() {
        let msg = user_message(&Map::new(), "Is dit rendabel?");
        assert_eq!(msg, "Context van de berekening:\n\n\nVraag van de gebruiker: Is dit rendabel?");
    }

    #[test]
    fn empty_reply_falls_back() {
        let parsed: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(parsed.into_answer(), NO_ANSWER);
        let parsed: ChatResponse =
            serde_json::from_value(json!({ "choices": [{ "message": { "content": "Ja." } }] })).unwrap();
        assert_eq!(parsed.into_answer(), "Ja.");
    }

    #[tokio::test]
    async fn missing_key_is_reported() {
        let advisor = Advisor::new(Client::new(), None, String::new());
        let err = advisor.ask(None, "vraag", &Map::new()).await.unwrap_err();
        assert!(matches!(err, AdvisorError::MissingApiKey));
        assert!(err.fallback_answer().contains("OPENROUTER_API_KEY"));
    }
}
