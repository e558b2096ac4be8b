use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dwelling::{DEFAULT_ELECTRICITY_PRICE, DEFAULT_FEED_IN_TARIFF, DEFAULT_GAS_PRICE};

pub const CONFIG_FILE: &str = "config.toml";

/// 입력을 비워 두었을 때 쓰는 기본 에너지 단가.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyPrices {
    /// €/m³
    pub gas: f64,
    /// €/kWh
    pub electricity: f64,
    /// €/kWh
    pub feed_in: f64,
}

impl Default for EnergyPrices {
    fn default() -> Self {
        Self {
            gas: DEFAULT_GAS_PRICE,
            electricity: DEFAULT_ELECTRICITY_PRICE,
            feed_in: DEFAULT_FEED_IN_TARIFF,
        }
    }
}

/// CLI 설정 (config.toml).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// nl / en, 비어 있으면 시스템 로케일
    pub language: Option<String>,
    pub prices: EnergyPrices,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("환경 변수 {name} 값이 잘못되었습니다 ({value}): {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_FILE))
}

pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if let Some(cfg) = load_if_present(path)? {
        return Ok(cfg);
    }
    let cfg = Config::default();
    cfg.save_to(path)?;
    Ok(cfg)
}

/// 파일을 만들지 않고 읽기만 한다. 파일이 없으면 `None`.
pub fn load_if_present(path: &Path) -> Result<Option<Config>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(toml::from_str(&content)?))
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP 서비스 설정. 환경 변수에서 읽는다.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    /// 없으면 AI 상담만 비활성
    pub openrouter_api_key: Option<String>,
    /// 없으면 상담 신청 전달만 비활성
    pub webhook_url: Option<Url>,
    /// LLM 호출 시 HTTP-Referer
    pub app_url: String,
    pub http_timeout: Duration,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 빈 문자열은 설정하지 않은 것으로 본다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnv {
                name: "BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let webhook_url = get("N8N_WEBHOOK_URL")
            .map(|raw| {
                Url::parse(&raw)
                    .map_err(|e| e.to_string())
                    .and_then(|url| match url.scheme() {
                        "http" | "https" => Ok(url),
                        other => Err(format!("지원하지 않는 스킴: {other}")),
                    })
                    .map_err(|reason| ConfigError::InvalidEnv {
                        name: "N8N_WEBHOOK_URL",
                        value: raw.clone(),
                        reason,
                    })
            })
            .transpose()?;

        let app_url = get("APP_URL")
            .or_else(|| get("NEXT_PUBLIC_APP_URL"))
            .unwrap_or_else(|| DEFAULT_APP_URL.to_string());

        Ok(Self {
            bind_addr,
            openrouter_api_key: get("OPENROUTER_API_KEY"),
            webhook_url,
            app_url,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<ServerSettings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerSettings::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(s.app_url, DEFAULT_APP_URL);
        assert!(s.openrouter_api_key.is_none());
        assert!(s.webhook_url.is_none());
    }

    #[test]
    fn relative_webhook_url_is_rejected() {
        let err = settings(&[("N8N_WEBHOOK_URL", "/hooks/lead")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "N8N_WEBHOOK_URL", .. }));
    }

    #[test]
    fn public_app_url_is_used_as_fallback() {
        let s = settings(&[("NEXT_PUBLIC_APP_URL", "https://energie.example")]).unwrap();
        assert_eq!(s.app_url, "https://energie.example");
        let s = settings(&[
            ("APP_URL", "https://a.example"),
            ("NEXT_PUBLIC_APP_URL", "https://b.example"),
        ])
        .unwrap();
        assert_eq!(s.app_url, "https://a.example");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let s = settings(&[("OPENROUTER_API_KEY", "  ")]).unwrap();
        assert!(s.openrouter_api_key.is_none());
    }

    #[test]
    fn bad_bind_address_fails() {
        assert!(settings(&[("BIND_ADDR", "nergens")]).is_err());
    }

    #[test]
    fn config_round_trips_through_file() {
        let dir = std::env::temp_dir().join(format!("est-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let created = load_or_create(&path).unwrap();
        assert_eq!(created, Config::default());

        let mut changed = created;
        changed.language = Some("en".into());
        changed.prices.gas = 1.45;
        changed.save_to(&path).unwrap();
        assert_eq!(load_or_create(&path).unwrap(), changed);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn reading_a_missing_config_leaves_no_file() {
        let dir = std::env::temp_dir().join(format!("est-config-readonly-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        assert_eq!(load_if_present(&path).unwrap(), None);
        assert!(!path.exists());

        Config::default().save_to(&path).unwrap();
        assert_eq!(load_if_present(&path).unwrap(), Some(Config::default()));
        fs::remove_dir_all(&dir).unwrap();
    }
}
