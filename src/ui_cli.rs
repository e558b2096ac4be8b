use std::io::{self, Write};

use serde_json::{Map, Number as JsonNumber, Value};

use crate::app::AppError;
use crate::config::Config;
use crate::format;
use crate::i18n::{keys, Translator};
use crate::tool::{self, CalcError, ToolName};

/// 메인 메뉴 선택지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculator(ToolName),
    Settings,
    Exit,
}

/// 비워 두면 설정 파일의 단가를 넣는 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDefault {
    Gas,
    Electricity,
    FeedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Integer,
    Text,
    Flag,
    Choice(&'static [&'static str]),
    Multi(&'static [&'static str]),
    /// 앞서 고른 다중 선택 항목마다 금액을 하나씩 묻는다. 값은 그 항목의 이름.
    PerChoice(&'static str),
}

/// 입력 폼의 한 항목. `name`은 JSON 필드 이름이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub price: Option<PriceDefault>,
}

const fn req(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: true,
        price: None,
    }
}

const fn opt(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: false,
        price: None,
    }
}

const fn price(name: &'static str, required: bool, default: PriceDefault) -> Field {
    Field {
        name,
        kind: FieldKind::Number,
        required,
        price: Some(default),
    }
}

use FieldKind::{Flag, Integer, Number, Text};

const HOUSE: FieldKind = FieldKind::Choice(&["apartment", "terraced", "corner", "semi-detached", "detached"]);
const STATUS: FieldKind = FieldKind::Choice(&["none", "moderate", "good"]);
const GLAZING: FieldKind = FieldKind::Choice(&["single", "double", "hr"]);

const SOLAR_PANELS: &[Field] = &[
    req("annualConsumptionKwh", Number),
    req(
        "roofOrientation",
        FieldKind::Choice(&["south", "south-east", "south-west", "east", "west", "north"]),
    ),
    req("roofTiltDeg", Number),
    req("panelPowerWp", Number),
    price("electricityPrice", true, PriceDefault::Electricity),
    opt("roofAreaM2", Number),
    opt("shadingPct", Number),
    opt("investment", Number),
    opt("netMetering", Flag),
    price("feedInTariff", false, PriceDefault::FeedIn),
    opt("homeBattery", Flag),
];

const HEAT_PUMP: &[Field] = &[
    req("annualGasM3", Number),
    req("houseType", HOUSE),
    req("insulation", FieldKind::Choice(&["poor", "moderate", "good"])),
    req("heatPumpType", FieldKind::Choice(&["hybrid", "all-electric"])),
    price("gasPrice", true, PriceDefault::Gas),
    price("electricityPrice", true, PriceDefault::Electricity),
    opt("cop", Number),
    opt("installationCost", Number),
    opt("insulationCorrectionPct", Number),
    opt("subsidy", Number),
];

const AIR_CONDITIONING: &[Field] = &[
    req("floorAreaM2", Number),
    req("ceilingHeightM", Number),
    req("insulation", FieldKind::Choice(&["good", "average", "poor"])),
    req("application", FieldKind::Choice(&["cooling", "cooling-heating"])),
    opt("coolingHoursPerYear", Number),
    price("electricityPrice", false, PriceDefault::Electricity),
    opt("occupants", Integer),
    opt("windowAreaM2", Number),
    opt("sunExposure", FieldKind::Choice(&["none", "moderate", "much"])),
    opt("rooms", Integer),
];

const HOME_BATTERY: &[Field] = &[
    req("pvPowerKwp", Number),
    req("annualConsumptionKwh", Number),
    req("goal", FieldKind::Choice(&["self-consumption", "backup", "dynamic"])),
    opt("annualGenerationKwh", Number),
    opt("autonomyHours", Number),
    opt("netMetering", Flag),
    price("electricityPrice", false, PriceDefault::Electricity),
    price("feedInTariff", false, PriceDefault::FeedIn),
    opt("investment", Number),
];

const INSULATION: &[Field] = &[
    req("houseType", HOUSE),
    req("annualGasM3", Number),
    req("measures", FieldKind::Multi(&["roof", "cavity-wall", "floor", "glass"])),
    opt("currentGlazing", GLAZING),
    price("gasPrice", false, PriceDefault::Gas),
    opt("constructionYear", Integer),
    opt("currentRoof", STATUS),
    opt("currentWall", STATUS),
    opt("currentFloor", STATUS),
    opt("investments", FieldKind::PerChoice("measures")),
    opt("subsidy", Number),
];

const BOILER_REPLACEMENT: &[Field] = &[
    req("annualGasM3", Number),
    req("currentBoiler", FieldKind::Choice(&["old", "reasonable", "new"])),
    req("occupants", Integer),
    req("desiredSystem", FieldKind::Choice(&["hr-boiler", "hybrid"])),
    price("gasPrice", false, PriceDefault::Gas),
    price("electricityPrice", false, PriceDefault::Electricity),
    opt("boilerAgeYears", Number),
    opt("installationCost", Number),
];

const EV_CHARGER: &[Field] = &[
    req("batteryCapacityKwh", Number),
    req("desiredChargeHours", Number),
    req("houseConnection", FieldKind::Choice(&["1-phase", "3-phase"])),
    opt("solarPanels", Flag),
    opt("evModel", Text),
    opt("gridConnection", FieldKind::Choice(&["25A", "35A", "unknown"])),
    opt("dynamicContract", Flag),
    opt("dayTariff", Number),
    opt("nightTariff", Number),
];

const ENERGY_CONTRACT: &[Field] = &[
    price("currentElectricityPrice", true, PriceDefault::Electricity),
    price("currentGasPrice", true, PriceDefault::Gas),
    req("newElectricityPrice", Number),
    req("newGasPrice", Number),
    req("annualElectricityKwh", Number),
    req("annualGasM3", Number),
    opt("contractType", FieldKind::Choice(&["fixed", "variable", "dynamic"])),
    opt("standingChargeCurrent", Number),
    opt("standingChargeNew", Number),
    opt("gridOperatorCosts", Number),
    opt("greenElectricity", Flag),
    opt("priceOutlook", FieldKind::Choice(&["stable", "rising", "falling"])),
];

const WINDOW_FRAMES: &[Field] = &[
    req("windowAreaM2", Number),
    req("frameMaterial", FieldKind::Choice(&["wood", "plastic", "aluminium"])),
    req("annualGasM3", Number),
    opt("houseType", HOUSE),
    opt("currentGlazing", GLAZING),
    opt("constructionYear", Integer),
    price("gasPrice", false, PriceDefault::Gas),
    opt("investment", Number),
];

const ENERGY_LABEL: &[Field] = &[
    req("constructionYear", Integer),
    req("houseType", HOUSE),
    req("floorAreaM2", Number),
    req("roofInsulation", STATUS),
    req("wallInsulation", STATUS),
    req("floorInsulation", STATUS),
    req("glazing", GLAZING),
    req("heatingSystem", FieldKind::Choice(&["cv-boiler", "heat-pump", "hybrid"])),
    opt("solarPanels", Flag),
    opt("solarKwp", Number),
    opt("ventilation", FieldKind::Choice(&["natural", "mechanical", "hrv"])),
    opt("heatEmitter", FieldKind::Choice(&["radiators", "underfloor-heating", "both"])),
];

const HOT_WATER_BOILER: &[Field] = &[
    req("occupants", Integer),
    req("currentSystem", FieldKind::Choice(&["cv-boiler", "electric", "none"])),
    opt("demand", FieldKind::Choice(&["low", "average", "high"])),
    opt("showerMinutesPerDay", Number),
    opt("bathsPerWeek", Number),
    opt("location", FieldKind::Choice(&["indoor", "outdoor", "ventilation-air"])),
    price("electricityPrice", false, PriceDefault::Electricity),
    price("gasPrice", false, PriceDefault::Gas),
    opt("investment", Number),
];

/// 계산기별 입력 폼.
pub fn form(tool: ToolName) -> &'static [Field] {
    match tool {
        ToolName::SolarPanels => SOLAR_PANELS,
        ToolName::HeatPump => HEAT_PUMP,
        ToolName::AirConditioning => AIR_CONDITIONING,
        ToolName::HomeBattery => HOME_BATTERY,
        ToolName::Insulation => INSULATION,
        ToolName::BoilerReplacement => BOILER_REPLACEMENT,
        ToolName::EvCharger => EV_CHARGER,
        ToolName::EnergyContract => ENERGY_CONTRACT,
        ToolName::WindowFrames => WINDOW_FRAMES,
        ToolName::EnergyLabel => ENERGY_LABEL,
        ToolName::HotWaterBoiler => HOT_WATER_BOILER,
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for (i, tool) in ToolName::ALL.iter().enumerate() {
        println!("{:>2}) {}", i + 1, tr.t(&tool.i18n_key()));
    }
    println!("{:>2}) {}", ToolName::ALL.len() + 1, tr.t(keys::MAIN_MENU_SETTINGS));
    println!(" 0) {}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim().parse::<usize>() {
            Ok(0) => return Ok(MenuChoice::Exit),
            Ok(n) if n <= ToolName::ALL.len() => return Ok(MenuChoice::Calculator(ToolName::ALL[n - 1])),
            Ok(n) if n == ToolName::ALL.len() + 1 => return Ok(MenuChoice::Settings),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 폼을 채워 계산하고 결과를 출력한다. 검증 오류는 출력만 하고 메뉴로 돌아간다.
pub fn handle_calculator(tr: &Translator, cfg: &Config, tool: ToolName) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(&tool.i18n_key()));
    let input = read_form(tr, cfg, form(tool))?;
    match tool::run_calculation(tool, Value::Object(input)) {
        Ok(result) => {
            println!("{}", tr.t(keys::RESULT_HEADING));
            print_value(tr, &result, 1);
        }
        Err(CalcError::Validation(errors)) => {
            println!("{}", tr.t(keys::VALIDATION_FAILED));
            for e in errors.iter() {
                println!("  - {}: {}", field_label(tr, &e.field), e.message);
            }
        }
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

fn field_label<'a>(tr: &'a Translator, name: &'a str) -> &'a str {
    tr.lookup(&format!("field.{name}"))
        .or_else(|| tr.lookup(&format!("result.{name}")))
        .unwrap_or(name)
}

fn choice_label<'a>(tr: &'a Translator, value: &'a str) -> &'a str {
    tr.lookup(&format!("choice.{value}")).unwrap_or(value)
}

fn default_price(cfg: &Config, kind: PriceDefault) -> f64 {
    match kind {
        PriceDefault::Gas => cfg.prices.gas,
        PriceDefault::Electricity => cfg.prices.electricity,
        PriceDefault::FeedIn => cfg.prices.feed_in,
    }
}

/// 폼의 각 항목을 차례로 묻는다. 선택 항목은 엔터로 건너뛴다.
pub fn read_form(tr: &Translator, cfg: &Config, fields: &[Field]) -> Result<Map<String, Value>, AppError> {
    let mut out = Map::new();
    for field in fields {
        let label = field_label(tr, field.name);
        let default = field.price.map(|p| default_price(cfg, p));
        let hint = match default {
            Some(d) => format!(" [{} {}]", tr.t(keys::PROMPT_DEFAULT_HINT), format::number(d, 2)),
            None if !field.required => format!(" {}", tr.t(keys::PROMPT_OPTIONAL_HINT)),
            None => String::new(),
        };

        let value = match field.kind {
            FieldKind::Choice(options) | FieldKind::Multi(options) => {
                let listing: Vec<String> = options
                    .iter()
                    .enumerate()
                    .map(|(i, o)| format!("{}={}", i + 1, choice_label(tr, o)))
                    .collect();
                println!("{label}: {}", listing.join("  "));
                if matches!(field.kind, FieldKind::Multi(_)) {
                    read_multi(tr, options, field.required, &hint)?
                } else {
                    read_choice(tr, options, field.required, &hint)?
                }
            }
            FieldKind::Flag => read_flag(tr, label, field.required, &hint)?,
            FieldKind::Text => {
                let s = read_line(&format!("{label}{hint}: "))?;
                let s = s.trim();
                (!s.is_empty()).then(|| Value::String(s.to_string()))
            }
            FieldKind::Number | FieldKind::Integer => {
                read_number(tr, label, &hint, field.required, default, field.kind == FieldKind::Integer)?
            }
            FieldKind::PerChoice(source) => {
                let chosen: Vec<String> = out
                    .get(source)
                    .and_then(Value::as_array)
                    .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
                    .unwrap_or_default();
                read_per_choice(tr, label, &hint, &chosen)?
            }
        };

        if let Some(v) = value {
            out.insert(field.name.to_string(), v);
        }
    }
    Ok(out)
}

fn read_number(
    tr: &Translator,
    label: &str,
    hint: &str,
    required: bool,
    default: Option<f64>,
    integer: bool,
) -> Result<Option<Value>, AppError> {
    loop {
        let s = read_line(&format!("{label}{hint}: "))?;
        let s = s.trim();
        if s.is_empty() {
            if let Some(d) = default {
                return Ok(JsonNumber::from_f64(d).map(Value::Number));
            }
            if !required {
                return Ok(None);
            }
            println!("{}", tr.t(keys::ERROR_REQUIRED));
            continue;
        }
        // 쉼표 소수점도 받는다.
        let normalised = s.replace(',', ".");
        if integer {
            if let Ok(n) = normalised.parse::<i64>() {
                return Ok(Some(Value::from(n)));
            }
        } else if let Some(n) = normalised.parse::<f64>().ok().and_then(JsonNumber::from_f64) {
            return Ok(Some(Value::Number(n)));
        }
        println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
    }
}

/// 선택값마다 선택 입력 금액을 받는다. JSON 키는 선택값의 camelCase 형태.
fn read_per_choice(tr: &Translator, label: &str, hint: &str, chosen: &[String]) -> Result<Option<Value>, AppError> {
    if chosen.is_empty() {
        return Ok(None);
    }
    println!("{label}{hint}:");
    let mut per = Map::new();
    for choice in chosen {
        let prompt = format!("  {}", choice_label(tr, choice));
        if let Some(v) = read_number(tr, &prompt, "", false, None, false)? {
            per.insert(per_choice_key(choice), v);
        }
    }
    Ok((!per.is_empty()).then_some(Value::Object(per)))
}

/// `cavity-wall` → `cavityWall`
pub fn per_choice_key(choice: &str) -> String {
    let mut key = String::with_capacity(choice.len());
    let mut upper = false;
    for c in choice.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            key.extend(c.to_uppercase());
            upper = false;
        } else {
            key.push(c);
        }
    }
    key
}

fn read_choice(
    tr: &Translator,
    options: &[&str],
    required: bool,
    hint: &str,
) -> Result<Option<Value>, AppError> {
    loop {
        let s = read_line(&format!("{}{hint}: ", tr.t(keys::PROMPT_CHOICE)))?;
        let s = s.trim();
        if s.is_empty() && !required {
            return Ok(None);
        }
        match s.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => {
                return Ok(Some(Value::String(options[n - 1].to_string())))
            }
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_multi(
    tr: &Translator,
    options: &[&str],
    required: bool,
    hint: &str,
) -> Result<Option<Value>, AppError> {
    loop {
        let s = read_line(&format!("{}{hint}: ", tr.t(keys::PROMPT_MULTI_HINT)))?;
        let s = s.trim();
        if s.is_empty() && !required {
            return Ok(None);
        }
        let picked: Option<Vec<Value>> = s
            .split([',', ' '])
            .filter(|p| !p.is_empty())
            .map(|p| match p.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => Some(Value::String(options[n - 1].to_string())),
                _ => None,
            })
            .collect();
        match picked {
            Some(values) if !values.is_empty() => return Ok(Some(Value::Array(values))),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_flag(tr: &Translator, label: &str, required: bool, hint: &str) -> Result<Option<Value>, AppError> {
    loop {
        let s = read_line(&format!("{label} {}{hint}: ", tr.t(keys::PROMPT_YES_NO)))?;
        match s.trim().to_lowercase().as_str() {
            "" if !required => return Ok(None),
            "j" | "ja" | "y" | "yes" => return Ok(Some(Value::Bool(true))),
            "n" | "nee" | "no" => return Ok(Some(Value::Bool(false))),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn render_scalar(tr: &Translator, value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some(tr.t("choice.yes").to_string()),
        Value::Bool(false) => Some(tr.t("choice.no").to_string()),
        Value::Number(n) => n.as_f64().map(|f| {
            let decimals = if f.fract() == 0.0 {
                0
            } else if (f * 10.0).fract().abs() < 1e-9 {
                1
            } else {
                2
            };
            format::number(f, decimals)
        }),
        Value::String(s) => Some(choice_label(tr, s).to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// 결과 JSON을 사람이 읽기 좋게 출력한다. null 항목은 생략한다.
pub fn print_value(tr: &Translator, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                let label = field_label(tr, key);
                match v {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{indent}{label}:");
                        print_value(tr, v, depth + 1);
                    }
                    _ => {
                        if let Some(text) = render_scalar(tr, v) {
                            println!("{indent}{label}: {text}");
                        }
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(_) => {
                        println!("{indent}-");
                        print_value(tr, item, depth + 1);
                    }
                    _ => {
                        if let Some(text) = render_scalar(tr, item) {
                            println!("{indent}- {text}");
                        }
                    }
                }
            }
        }
        other => {
            if let Some(text) = render_scalar(tr, other) {
                println!("{indent}{text}");
            }
        }
    }
}

/// 설정 메뉴. 변경 여부를 돌려준다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}", tr.t(keys::SETTINGS_CURRENT));
    println!(
        "  {}: {}",
        tr.t(keys::SETTINGS_LANGUAGE),
        cfg.language.as_deref().unwrap_or("auto")
    );
    println!("  {}: {}", tr.t(keys::SETTINGS_GAS_PRICE), format::currency(cfg.prices.gas));
    println!(
        "  {}: {}",
        tr.t(keys::SETTINGS_ELECTRICITY_PRICE),
        format::currency(cfg.prices.electricity)
    );
    println!(
        "  {}: {}",
        tr.t(keys::SETTINGS_FEED_IN_TARIFF),
        format::currency(cfg.prices.feed_in)
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));

    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let changed = match sel.trim() {
        "" => return Ok(false),
        "1" => {
            let lang = read_line("nl / en / auto: ")?;
            match lang.trim().to_lowercase().as_str() {
                "auto" => cfg.language = None,
                l @ ("nl" | "en") => cfg.language = Some(l.to_string()),
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    return Ok(false);
                }
            }
            true
        }
        "2" | "3" | "4" => {
            let value = read_f64(tr, "€: ")?;
            if !(value.is_finite() && value >= 0.0) {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(false);
            }
            match sel.trim() {
                "2" => cfg.prices.gas = value,
                "3" => cfg.prices.electricity = value,
                _ => cfg.prices.feed_in = value,
            }
            true
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            false
        }
    };
    if changed {
        println!("{}", tr.t(keys::SETTINGS_SAVED));
    }
    Ok(changed)
}

/// 한 줄을 읽는다. 입력이 닫히면 오류.
fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().replace(',', ".").parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_has_a_form_with_required_fields() {
        for tool in ToolName::ALL {
            let fields = form(tool);
            assert!(fields.iter().any(|f| f.required), "{tool}");
        }
    }

    #[test]
    fn form_field_names_are_unique() {
        for tool in ToolName::ALL {
            let fields = form(tool);
            let mut names: Vec<_> = fields.iter().map(|f| f.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), fields.len(), "{tool}");
        }
    }

    #[test]
    fn per_choice_fields_follow_a_multi_select() {
        for tool in ToolName::ALL {
            let fields = form(tool);
            for (i, field) in fields.iter().enumerate() {
                if let FieldKind::PerChoice(source) = field.kind {
                    let earlier = fields[..i].iter().find(|f| f.name == source);
                    assert!(
                        matches!(earlier.map(|f| f.kind), Some(FieldKind::Multi(_))),
                        "{tool}: {}",
                        field.name
                    );
                }
            }
        }
    }

    #[test]
    fn per_choice_keys_are_camel_case() {
        assert_eq!(per_choice_key("cavity-wall"), "cavityWall");
        assert_eq!(per_choice_key("roof"), "roof");
    }

    #[test]
    fn scalars_render_in_dutch_notation() {
        let tr = Translator::new("nl");
        assert_eq!(render_scalar(&tr, &Value::from(1234.5)).as_deref(), Some("1.234,5"));
        assert_eq!(render_scalar(&tr, &Value::from(12.34)).as_deref(), Some("12,34"));
        assert_eq!(render_scalar(&tr, &Value::from(800)).as_deref(), Some("800"));
        assert_eq!(render_scalar(&tr, &Value::Null), None);
    }
}
