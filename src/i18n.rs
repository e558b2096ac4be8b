use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sys_locale::get_locale;

/// 고정 문자열 키. 입력 항목과 결과 항목은 `field.<이름>`, `result.<이름>`,
/// 선택지는 `choice.<값>`, 계산기 이름은 `tool.<슬러그>` 형태로 조회한다.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PROMPT_OPTIONAL_HINT: &str = "prompt.optional_hint";
    pub const PROMPT_DEFAULT_HINT: &str = "prompt.default_hint";
    pub const PROMPT_YES_NO: &str = "prompt.yes_no";
    pub const PROMPT_MULTI_HINT: &str = "prompt.multi_hint";
    pub const PROMPT_CHOICE: &str = "prompt.choice";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_REQUIRED: &str = "error.required";
    pub const VALIDATION_FAILED: &str = "error.validation_failed";
    pub const RESULT_HEADING: &str = "result.heading";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_GAS_PRICE: &str = "settings.gas_price";
    pub const SETTINGS_ELECTRICITY_PRICE: &str = "settings.electricity_price";
    pub const SETTINGS_FEED_IN_TARIFF: &str = "settings.feed_in_tariff";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Nl,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("en") {
            Language::En
        } else {
            Language::Nl
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Nl => "nl",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 내장 언어팩만 쓰는 번역기. 알 수 없는 코드는 nl로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어팩 디렉터리에 `<code>.toml`이 있으면 그것을 먼저 쓰고, 없는 키는 내장 팩에서 찾는다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let built_in = built_in_pack(lang).unwrap_or_default();
        let strings = pack_dir
            .and_then(|dir| load_pack(dir, lang_code))
            .map(|mut custom| {
                for (k, v) in &built_in {
                    custom.entry(k.clone()).or_insert_with(|| v.clone());
                }
                custom
            })
            .unwrap_or(built_in);
        let fallback = if lang == Language::Nl {
            HashMap::new()
        } else {
            built_in_pack(Language::Nl).unwrap_or_default()
        };
        Self {
            lang,
            strings,
            fallback,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회한다. 언어팩 어디에도 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
    }

    /// 번역 문자열. 없으면 키를 그대로 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }
}

/// CLI 플래그, 설정, 시스템 로케일 순으로 언어 코드를 정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "nl-nl".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("nl") => Some("nl-nl".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    normalize_lang(&lang)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// 디렉터리에서 언어팩을 읽는다. 전체 코드(en-us) 다음 기본 코드(en) 순.
fn load_pack(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    try_load(lang).or_else(|| {
        lang.split_once(['-', '_'])
            .and_then(|(base, _)| try_load(base))
    })
}

/// 중첩 테이블을 점으로 이은 플랫 맵으로 편다.
fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 빌드 시 포함되는 언어팩.
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::Nl => parse_toml_to_map(include_str!("../locales/nl-nl.toml")),
        Language::En => parse_toml_to_map(include_str!("../locales/en-us.toml")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_cover_menu_keys() {
        for code in ["nl", "en"] {
            let tr = Translator::new(code);
            for key in [keys::MAIN_MENU_TITLE, keys::MAIN_MENU_EXIT, keys::APP_EXIT] {
                assert!(tr.lookup(key).is_some(), "{code} misses {key}");
            }
        }
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let tr = Translator::new("nl");
        assert_eq!(tr.t("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn language_resolution_order() {
        assert_eq!(resolve_language("en", Some("nl")), "en-us");
        assert_eq!(resolve_language("auto", Some("nl")), "nl-nl");
        assert_eq!(normalize_lang("de"), None);
    }

    #[test]
    fn nested_tables_are_flattened() {
        let map = parse_toml_to_map("[field]\ngasPrice = \"Gasprijs\"\n").unwrap();
        assert_eq!(map.get("field.gasPrice").map(String::as_str), Some("Gasprijs"));
    }
}
